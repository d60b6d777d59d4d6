#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Power,
    Menu,
}

impl KeyCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Power => "KEYCODE_POWER",
            Self::Menu => "KEYCODE_MENU",
        }
    }
}

impl std::fmt::Display for KeyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
