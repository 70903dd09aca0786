//! Colour palette

use rand::Rng;

use crate::sim::{BallKind, SPECIAL_KINDS};

/// 8-bit RGB to linear-ish float RGBA
pub const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

pub mod colors {
    use super::rgb;

    pub const HERO: [f32; 4] = rgb(255, 0, 0);
    pub const ENEMY: [f32; 4] = rgb(0, 102, 0);
    pub const SPEED_UP: [f32; 4] = rgb(255, 255, 0);
    pub const SPEED_DOWN: [f32; 4] = rgb(102, 51, 0);
    pub const SMALLER: [f32; 4] = rgb(0, 255, 255);
    pub const BIGGER: [f32; 4] = rgb(0, 0, 255);
    pub const GODLIKE: [f32; 4] = rgb(255, 255, 255);
    pub const FROZEN: [f32; 4] = rgb(0, 0, 0);
    pub const PLAYGROUND: [f32; 4] = rgb(128, 128, 128);
    pub const SCOREBOARD: [f32; 4] = rgb(255, 128, 0);
}

/// Fixed colour of a kind. `Random` has none of its own; see [`random_special`].
pub fn kind_color(kind: BallKind) -> Option<[f32; 4]> {
    Some(match kind {
        BallKind::Hero => colors::HERO,
        BallKind::Enemy => colors::ENEMY,
        BallKind::SpeedUp => colors::SPEED_UP,
        BallKind::SpeedDown => colors::SPEED_DOWN,
        BallKind::Smaller => colors::SMALLER,
        BallKind::Bigger => colors::BIGGER,
        BallKind::Godlike => colors::GODLIKE,
        BallKind::Frozen => colors::FROZEN,
        BallKind::Random => return None,
    })
}

/// Colour of a random concrete special, re-rolled every frame
pub fn random_special<R: Rng + ?Sized>(rng: &mut R) -> [f32; 4] {
    let kind = SPECIAL_KINDS[rng.random_range(0..SPECIAL_KINDS.len())];
    kind_color(kind).unwrap_or(colors::HERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_rgb_scaling() {
        assert_eq!(rgb(255, 0, 255), [1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_only_random_lacks_a_color() {
        assert_eq!(kind_color(BallKind::Random), None);
        assert_eq!(kind_color(BallKind::Frozen), Some(colors::FROZEN));
    }

    #[test]
    fn test_random_special_uses_special_colors() {
        let mut rng = Pcg32::seed_from_u64(11);
        let specials: Vec<_> = SPECIAL_KINDS.iter().filter_map(|k| kind_color(*k)).collect();
        for _ in 0..50 {
            assert!(specials.contains(&random_special(&mut rng)));
        }
    }
}
