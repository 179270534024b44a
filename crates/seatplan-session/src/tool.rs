use serde::{Deserialize, Serialize};

/// Active editing tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    #[default]
    Select,
    AddRow,
    AddZone,
    AddText,
    Pan,
}

impl Tool {
    pub const ALL: [Tool; 5] = [Tool::Select, Tool::AddRow, Tool::AddZone, Tool::AddText, Tool::Pan];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::AddRow => "add-row",
            Tool::AddZone => "add-zone",
            Tool::AddText => "add-text",
            Tool::Pan => "pan",
        }
    }

    /// Single-key shortcut
    pub fn shortcut(&self) -> char {
        match self {
            Tool::Select => 'v',
            Tool::AddRow => 'r',
            Tool::AddZone => 'z',
            Tool::AddText => 't',
            Tool::Pan => 'h',
        }
    }

    pub fn from_shortcut(key: char) -> Option<Tool> {
        let key = key.to_ascii_lowercase();
        Tool::ALL.into_iter().find(|t| t.shortcut() == key)
    }

    /// Does a click with this tool create an element?
    pub fn places(&self) -> bool {
        matches!(self, Tool::AddRow | Tool::AddZone | Tool::AddText)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcuts_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(Tool::from_shortcut(tool.shortcut()), Some(tool));
        }
        assert_eq!(Tool::from_shortcut('R'), Some(Tool::AddRow));
        assert_eq!(Tool::from_shortcut('q'), None);
    }
}
