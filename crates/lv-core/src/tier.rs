//! Visual tiers for rendered marks

/// Named emphasis level of a mark, ordered by precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Default,
    /// Label-1 records
    Highlighted,
    /// Leaders in the shared selection
    Selected,
    /// The mark under the pointer, for the current frame only
    Hover,
}

impl Tier {
    /// Resolve the tier from its three independent signals.
    ///
    /// Precedence is hover > selected > highlighted > default.
    pub fn resolve(labelled: bool, selected: bool, hovered: bool) -> Self {
        if hovered {
            Tier::Hover
        } else if selected {
            Tier::Selected
        } else if labelled {
            Tier::Highlighted
        } else {
            Tier::Default
        }
    }

    /// Whether marks of this tier carry a name label
    pub fn shows_label(self) -> bool {
        !matches!(self, Tier::Default)
    }
}
