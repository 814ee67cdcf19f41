use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What dropping onto a node would do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DropMode {
    Replace,
    AddUnder,
    AddSibling,
}

impl DropMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DropMode::Replace => "replace",
            DropMode::AddUnder => "addUnder",
            DropMode::AddSibling => "addSibling",
        }
    }

    pub fn operation(self) -> Operation {
        match self {
            DropMode::Replace => Operation::Replace,
            DropMode::AddUnder => Operation::AddUnder,
            DropMode::AddSibling => Operation::AddSibling,
        }
    }
}

impl fmt::Display for DropMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation subject to the ERP lock rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Modify,
    Replace,
    AddUnder,
    AddSibling,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Modify => "modify",
            Operation::Replace => "replace",
            Operation::AddUnder => "addUnder",
            Operation::AddSibling => "addSibling",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match folded.as_str() {
            "modify" | "update" => Ok(Operation::Modify),
            "replace" => Ok(Operation::Replace),
            "addunder" => Ok(Operation::AddUnder),
            "addsibling" => Ok(Operation::AddSibling),
            "delete" => Ok(Operation::Delete),
            _ => Err(format!(
                "Invalid operation: {}. Expected one of modify, replace, add-under, add-sibling, delete",
                s
            )),
        }
    }
}
