use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields of an auth payload that are credentials rather than user data.
const CREDENTIAL_FIELDS: [&str; 2] = ["token", "refreshToken"];

/// The user object returned by the backend.
///
/// Its shape belongs to the backend; the front end only cares whether one is present.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct UserRecord(Map<String, Value>);

impl UserRecord {
    /// Builds a user out of a login/register payload, dropping the token fields.
    pub fn from_auth_payload(mut fields: Map<String, Value>) -> Self {
        for field in CREDENTIAL_FIELDS {
            fields.remove(field);
        }
        UserRecord(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn email(&self) -> Option<&str> {
        self.get("email").and_then(Value::as_str)
    }
}
