//! Snake and food skins: preference-encoded names with exhaustive mappings
//! to render attributes.

use ratatui::style::Color;

/// Snake body color, persisted by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnakeSkin {
    #[default]
    Green,
    Blue,
    Purple,
    Orange,
}

impl SnakeSkin {
    pub const ALL: [SnakeSkin; 4] = [
        SnakeSkin::Green,
        SnakeSkin::Blue,
        SnakeSkin::Purple,
        SnakeSkin::Orange,
    ];

    /// Name used as the persisted preference value
    pub fn name(self) -> &'static str {
        match self {
            SnakeSkin::Green => "green",
            SnakeSkin::Blue => "blue",
            SnakeSkin::Purple => "purple",
            SnakeSkin::Orange => "orange",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|skin| skin.name() == name)
    }

    pub fn color(self) -> Color {
        match self {
            SnakeSkin::Green => Color::Rgb(0x2e, 0xcc, 0x71),
            SnakeSkin::Blue => Color::Rgb(0x34, 0x98, 0xdb),
            SnakeSkin::Purple => Color::Rgb(0x9b, 0x59, 0xb6),
            SnakeSkin::Orange => Color::Rgb(0xe6, 0x7e, 0x22),
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

/// Food glyph, persisted by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FoodSkin {
    #[default]
    Apple,
    Orange,
    Grape,
    Cherry,
    Strawberry,
}

impl FoodSkin {
    pub const ALL: [FoodSkin; 5] = [
        FoodSkin::Apple,
        FoodSkin::Orange,
        FoodSkin::Grape,
        FoodSkin::Cherry,
        FoodSkin::Strawberry,
    ];

    /// Name used as the persisted preference value
    pub fn name(self) -> &'static str {
        match self {
            FoodSkin::Apple => "apple",
            FoodSkin::Orange => "orange",
            FoodSkin::Grape => "grape",
            FoodSkin::Cherry => "cherry",
            FoodSkin::Strawberry => "strawberry",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|skin| skin.name() == name)
    }

    /// Double-width emoji, filling one two-column grid cell
    pub fn glyph(self) -> &'static str {
        match self {
            FoodSkin::Apple => "🍎",
            FoodSkin::Orange => "🍊",
            FoodSkin::Grape => "🍇",
            FoodSkin::Cherry => "🍒",
            FoodSkin::Strawberry => "🍓",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, offset: usize) -> T {
    let index = all
        .iter()
        .position(|item| *item == current)
        .unwrap_or_default();
    all[(index + offset) % all.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_skin_names_round_trip() {
        for skin in SnakeSkin::ALL {
            assert_eq!(SnakeSkin::from_name(skin.name()), Some(skin));
        }
        assert_eq!(SnakeSkin::from_name("tartan"), None);
    }

    #[test]
    fn test_food_skin_names_round_trip() {
        for skin in FoodSkin::ALL {
            assert_eq!(FoodSkin::from_name(skin.name()), Some(skin));
        }
        assert_eq!(FoodSkin::from_name("durian"), None);
    }

    #[test]
    fn test_cycling_visits_every_variant() {
        let mut skin = SnakeSkin::Green;
        for expected in SnakeSkin::ALL {
            assert_eq!(skin, expected);
            skin = skin.next();
        }
        assert_eq!(skin, SnakeSkin::Green);

        assert_eq!(SnakeSkin::Green.prev(), SnakeSkin::Orange);
        assert_eq!(FoodSkin::Apple.prev(), FoodSkin::Strawberry);
        assert_eq!(FoodSkin::Strawberry.next(), FoodSkin::Apple);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(SnakeSkin::default(), SnakeSkin::Green);
        assert_eq!(FoodSkin::default(), FoodSkin::Apple);
    }
}
