//! API route names.

/// getdigest
pub const GET_DIGEST: &str = "getdigest";

/// userinfo
pub const USER_INFO: &str = "userinfo";

/// listfolder
pub const LIST_FOLDER: &str = "listfolder";

/// getfilelink
pub const GET_FILE_LINK: &str = "getfilelink";

/// uploadfile
pub const UPLOAD_FILE: &str = "uploadfile";

/// search
pub const SEARCH: &str = "search";

/// stat
pub const STAT: &str = "stat";

/// invite
pub const INVITE: &str = "invite";

/// userinvites
pub const USER_INVITES: &str = "userinvites";

/// logout
pub const LOGOUT: &str = "logout";

/// listtokens
pub const LIST_TOKENS: &str = "listtokens";

/// deletetoken
pub const DELETE_TOKEN: &str = "deletetoken";
