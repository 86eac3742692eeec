use serde::{Deserialize, Serialize};

use super::string_id_entity;

/// A Zabbix user.
///
/// `passwd` is write-only on the server side and comes back empty from get.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Server-assigned id, empty until created
    #[serde(skip_serializing_if = "String::is_empty")]
    pub userid: String,
    /// Login name
    pub username: String,
    /// Password, only sent on create / update
    #[serde(skip_serializing_if = "String::is_empty")]
    pub passwd: String,
}

/// A list of users
pub type Users = Vec<User>;

string_id_entity!(User, userid, "user", "userids");
