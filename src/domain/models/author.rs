use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Author {
    User,
    Assistant,
    Parley,
}

impl ToString for Author {
    fn to_string(&self) -> String {
        match self {
            Author::User => return Config::get(ConfigKey::Username),
            Author::Assistant => {
                let name = Config::get(ConfigKey::AssistantName);
                if name.is_empty() {
                    return String::from("Assistant");
                }
                return name;
            }
            Author::Parley => return String::from("Parley"),
        }
    }
}

impl Author {
    /// Role name used by the Assistants API.
    pub fn role(&self) -> &'static str {
        match self {
            Author::User => return "user",
            Author::Assistant | Author::Parley => return "assistant",
        }
    }
}
