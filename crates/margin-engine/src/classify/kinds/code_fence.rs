/// Which delimiter a fence uses. Backtick and tilde fences never close each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    pub fn delimiter(self) -> &'static str {
        match self {
            FenceKind::Backticks => CodeFence::BACKTICKS,
            FenceKind::Tildes => CodeFence::TILDES,
        }
    }
}

/// Fenced code block syntax. All fence delimiter knowledge lives here.
pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";
    pub const TILDES: &'static str = "~~~";

    /// Returns the fence kind if `line` is a fence boundary.
    ///
    /// Leading whitespace is allowed, and so is an info string after an
    /// opening delimiter (```` ```rust ````).
    pub fn sig(line: &str) -> Option<FenceKind> {
        let t = line
            .trim_end_matches(['\r', '\n'])
            .trim_start_matches([' ', '\t']);
        if t.starts_with(Self::BACKTICKS) {
            Some(FenceKind::Backticks)
        } else if t.starts_with(Self::TILDES) {
            Some(FenceKind::Tildes)
        } else {
            None
        }
    }

    /// Whether `line` closes a fence opened with `kind`.
    pub fn closes(kind: FenceKind, line: &str) -> bool {
        Self::sig(line) == Some(kind)
    }
}
