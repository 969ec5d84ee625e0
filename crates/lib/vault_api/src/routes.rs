//! Route paths.

pub const POST_USER_REGISTER: &str = "/api/user/register";
pub const POST_USER_LOGIN: &str = "/api/user/login";

pub const DATA_CREDENTIAL: &str = "/api/data/credential";
pub const DATA_CREDENTIAL_LABEL: &str = "/api/data/credential/{label}";
pub const DATA_CARD: &str = "/api/data/card";
pub const DATA_CARD_LABEL: &str = "/api/data/card/{label}";
pub const DATA_TEXT: &str = "/api/data/text";
pub const DATA_TEXT_LABEL: &str = "/api/data/text/{label}";

pub const POST_FILE_UPLOAD: &str = "/api/file/upload";
pub const GET_FILE_DOWNLOAD: &str = "/api/file/download";
pub const DELETE_FILE_NAME: &str = "/api/file/{name}";
