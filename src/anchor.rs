/// Horizontal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AlignX {
    #[default]
    Left,
    CenterX,
    Right,
}

/// Vertical alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AlignY {
    #[default]
    Top,
    CenterY,
    Bottom,
}

/// How a resolved anchor is written into the owner's transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Strategy {
    /// Only the position changes, the element keeps its own size.
    Floating,
    /// Position and size are both derived from the container bounds.
    Stretch,
}

/// Where an element sits relative to its container.
///
/// The nine floating anchors place the element at a corner, an edge midpoint or the center. The
/// five stretch anchors fill an edge (or the whole container) minus the stretch insets.
///
/// The discriminants are stable and can be round-tripped through [`Anchor::raw`] and
/// `Anchor::try_from(i32)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum Anchor {
    #[default]
    TopLeft = 1,
    TopCenter,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    BottomCenter,
    BottomRight,
    StretchLeft,
    StretchTop,
    StretchRight,
    StretchBottom,
    StretchCenter,
}

impl Anchor {
    pub const ALL: [Anchor; 14] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::Left,
        Anchor::Center,
        Anchor::Right,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
        Anchor::StretchLeft,
        Anchor::StretchTop,
        Anchor::StretchRight,
        Anchor::StretchBottom,
        Anchor::StretchCenter,
    ];

    /// The numeric id of this anchor.
    #[inline]
    pub fn raw(self) -> i32 {
        self as i32
    }

    pub fn strategy(self) -> Strategy {
        if self.is_stretch() {
            Strategy::Stretch
        } else {
            Strategy::Floating
        }
    }

    /// The per-axis alignment of a floating anchor, `None` for stretch anchors.
    pub fn align(self) -> Option<(AlignX, AlignY)> {
        match self {
            Anchor::TopLeft => Some((AlignX::Left, AlignY::Top)),
            Anchor::TopCenter => Some((AlignX::CenterX, AlignY::Top)),
            Anchor::TopRight => Some((AlignX::Right, AlignY::Top)),
            Anchor::Left => Some((AlignX::Left, AlignY::CenterY)),
            Anchor::Center => Some((AlignX::CenterX, AlignY::CenterY)),
            Anchor::Right => Some((AlignX::Right, AlignY::CenterY)),
            Anchor::BottomLeft => Some((AlignX::Left, AlignY::Bottom)),
            Anchor::BottomCenter => Some((AlignX::CenterX, AlignY::Bottom)),
            Anchor::BottomRight => Some((AlignX::Right, AlignY::Bottom)),
            Anchor::StretchLeft
            | Anchor::StretchTop
            | Anchor::StretchRight
            | Anchor::StretchBottom
            | Anchor::StretchCenter => None,
        }
    }

    pub fn is_left(self) -> bool {
        matches!(
            self,
            Anchor::Left | Anchor::TopLeft | Anchor::BottomLeft | Anchor::StretchLeft
        )
    }

    pub fn is_right(self) -> bool {
        matches!(
            self,
            Anchor::Right | Anchor::TopRight | Anchor::BottomRight | Anchor::StretchRight
        )
    }

    pub fn is_top(self) -> bool {
        matches!(
            self,
            Anchor::TopLeft | Anchor::TopCenter | Anchor::TopRight | Anchor::StretchTop
        )
    }

    pub fn is_bottom(self) -> bool {
        matches!(
            self,
            Anchor::BottomLeft | Anchor::BottomCenter | Anchor::BottomRight | Anchor::StretchBottom
        )
    }

    pub fn is_stretch(self) -> bool {
        matches!(
            self,
            Anchor::StretchLeft
                | Anchor::StretchTop
                | Anchor::StretchRight
                | Anchor::StretchBottom
                | Anchor::StretchCenter
        )
    }

    /// Mirrors a bottom anchor to its top counterpart. Stretch-top maps to stretch-bottom since
    /// the stretch anchors name the inset that fixes their size.
    pub fn convert_to_top(self) -> Anchor {
        match self {
            Anchor::BottomLeft => Anchor::TopLeft,
            Anchor::BottomCenter => Anchor::TopCenter,
            Anchor::BottomRight => Anchor::TopRight,
            Anchor::StretchTop => Anchor::StretchBottom,
            other => other,
        }
    }

    pub fn convert_to_bottom(self) -> Anchor {
        match self {
            Anchor::TopLeft => Anchor::BottomLeft,
            Anchor::TopCenter => Anchor::BottomCenter,
            Anchor::TopRight => Anchor::BottomRight,
            Anchor::StretchBottom => Anchor::StretchTop,
            other => other,
        }
    }

    pub fn convert_to_left(self) -> Anchor {
        match self {
            Anchor::TopRight => Anchor::TopLeft,
            Anchor::Center => Anchor::Left,
            Anchor::BottomRight => Anchor::BottomLeft,
            Anchor::StretchRight => Anchor::StretchLeft,
            other => other,
        }
    }

    pub fn convert_to_right(self) -> Anchor {
        match self {
            Anchor::TopLeft => Anchor::TopRight,
            Anchor::Left => Anchor::Right,
            Anchor::BottomLeft => Anchor::BottomRight,
            Anchor::StretchLeft => Anchor::StretchRight,
            other => other,
        }
    }

    pub fn convert_to_center(self) -> Anchor {
        match self {
            Anchor::TopLeft | Anchor::TopRight => Anchor::TopCenter,
            Anchor::Left | Anchor::Right => Anchor::Center,
            Anchor::BottomLeft | Anchor::BottomRight => Anchor::BottomCenter,
            other => other,
        }
    }
}

impl TryFrom<i32> for Anchor {
    /// The rejected raw value.
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Anchor::ALL
            .iter()
            .copied()
            .find(|anchor| anchor.raw() == value)
            .ok_or(value)
    }
}

impl From<(AlignX, AlignY)> for Anchor {
    fn from(value: (AlignX, AlignY)) -> Self {
        match value {
            (AlignX::Left, AlignY::Top) => Anchor::TopLeft,
            (AlignX::CenterX, AlignY::Top) => Anchor::TopCenter,
            (AlignX::Right, AlignY::Top) => Anchor::TopRight,
            (AlignX::Left, AlignY::CenterY) => Anchor::Left,
            (AlignX::CenterX, AlignY::CenterY) => Anchor::Center,
            (AlignX::Right, AlignY::CenterY) => Anchor::Right,
            (AlignX::Left, AlignY::Bottom) => Anchor::BottomLeft,
            (AlignX::CenterX, AlignY::Bottom) => Anchor::BottomCenter,
            (AlignX::Right, AlignY::Bottom) => Anchor::BottomRight,
        }
    }
}

/// CSS-like positioning mode. Stored on the layout for collaborators that flow elements; the
/// anchor resolution itself does not branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Positioning {
    #[default]
    Static,
    Absolute,
    Fixed,
    Relative,
    Sticky,
}
