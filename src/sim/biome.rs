//! Procedural biome backdrop
//!
//! Five biomes cycle endlessly. Each biome owns a static table of scenery
//! archetypes; generation walks a virtual x-axis in fixed strides and
//! rolls each archetype independently, then sprinkles biome-specific
//! extras at random positions. Two element sets are live at all times:
//! the current biome and the next one (pre-generated a screen to the
//! right), cross-faded by a transition scalar that advances with game
//! speed.

use rand::Rng;

use crate::color::Rgb;
use crate::consts::*;

/// Parallax depth tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Back,
    Mid,
    Front,
}

impl Layer {
    /// Fraction of the world scroll applied to this tier
    pub fn scroll_factor(self) -> f32 {
        match self {
            Layer::Back => 0.3,
            Layer::Mid => 0.5,
            Layer::Front => 0.7,
        }
    }

    /// Base draw alpha, dimmer toward the back
    pub fn base_alpha(self) -> f32 {
        match self {
            Layer::Back => 0.6,
            Layer::Mid => 0.7,
            Layer::Front => 0.9,
        }
    }

    /// Height exaggeration, taller toward the back
    pub fn height_scale(self) -> f32 {
        match self {
            Layer::Back => 1.1,
            Layer::Mid => 1.0,
            Layer::Front => 0.9,
        }
    }
}

/// Scenery element shapes the renderer knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Tree,
    Mountain,
    Building,
    Dune,
    Cactus,
    Palm,
    Rock,
    Cloud,
    Bird,
    Boat,
    Antenna,
}

impl ElementKind {
    /// Rough on-screen width, used for wrap-seam duplication and culling
    pub fn estimated_width(self) -> f32 {
        match self {
            ElementKind::Tree => 50.0,
            ElementKind::Mountain => 180.0,
            ElementKind::Building => 40.0,
            ElementKind::Dune => 100.0,
            ElementKind::Cactus => 30.0,
            ElementKind::Palm => 60.0,
            ElementKind::Rock => 50.0,
            ElementKind::Cloud => 75.0,
            ElementKind::Bird | ElementKind::Boat | ElementKind::Antenna => 60.0,
        }
    }
}

/// A scenery archetype: what can spawn at each generation stride
#[derive(Debug, Clone, Copy)]
pub struct Archetype {
    pub kind: ElementKind,
    pub color: Rgb,
    pub heights: &'static [f32],
    /// Bernoulli success chance per stride, in [0, 1]
    pub frequency: f32,
    pub layer: Layer,
}

/// A biome descriptor: immutable configuration
#[derive(Debug, Clone, Copy)]
pub struct Biome {
    pub name: &'static str,
    pub ground_color: Rgb,
    pub sky_color: Rgb,
    pub archetypes: &'static [Archetype],
}

pub const BIOMES: [Biome; 5] = [
    Biome {
        name: "forest",
        ground_color: Rgb::new(0x3b, 0x2d, 0x1d),
        sky_color: Rgb::new(0x4a, 0x7a, 0xb3),
        archetypes: &[
            Archetype {
                kind: ElementKind::Cloud,
                color: Rgb::new(0xff, 0xff, 0xff),
                heights: &[450.0, 500.0],
                frequency: 0.1,
                layer: Layer::Back,
            },
            Archetype {
                kind: ElementKind::Tree,
                color: Rgb::new(0x0e, 0x2a, 0x0e),
                heights: &[280.0, 320.0, 380.0],
                frequency: 0.4,
                layer: Layer::Back,
            },
            Archetype {
                kind: ElementKind::Tree,
                color: Rgb::new(0x13, 0x36, 0x13),
                heights: &[200.0, 240.0, 280.0],
                frequency: 0.35,
                layer: Layer::Mid,
            },
            Archetype {
                kind: ElementKind::Tree,
                color: Rgb::new(0x1a, 0x42, 0x1a),
                heights: &[120.0, 160.0, 200.0],
                frequency: 0.3,
                layer: Layer::Front,
            },
        ],
    },
    Biome {
        name: "mountains",
        ground_color: Rgb::new(0x4d, 0x4d, 0x4d),
        sky_color: Rgb::new(0x6b, 0x88, 0xa5),
        archetypes: &[
            Archetype {
                kind: ElementKind::Cloud,
                color: Rgb::new(0xf0, 0xf0, 0xf0),
                heights: &[500.0, 550.0],
                frequency: 0.15,
                layer: Layer::Back,
            },
            Archetype {
                kind: ElementKind::Mountain,
                color: Rgb::new(0x33, 0x33, 0x33),
                heights: &[350.0, 400.0, 450.0],
                frequency: 0.25,
                layer: Layer::Back,
            },
            Archetype {
                kind: ElementKind::Mountain,
                color: Rgb::new(0x40, 0x40, 0x40),
                heights: &[250.0, 300.0, 350.0],
                frequency: 0.3,
                layer: Layer::Mid,
            },
            Archetype {
                kind: ElementKind::Mountain,
                color: Rgb::new(0x4d, 0x4d, 0x4d),
                heights: &[150.0, 200.0, 250.0],
                frequency: 0.35,
                layer: Layer::Front,
            },
        ],
    },
    Biome {
        name: "city",
        ground_color: Rgb::new(0x2d, 0x2d, 0x2d),
        sky_color: Rgb::new(0x4d, 0x57, 0x6b),
        archetypes: &[
            Archetype {
                kind: ElementKind::Building,
                color: Rgb::new(0x1a, 0x1a, 0x1a),
                heights: &[380.0, 420.0, 460.0, 500.0],
                frequency: 0.35,
                layer: Layer::Back,
            },
            Archetype {
                kind: ElementKind::Building,
                color: Rgb::new(0x26, 0x26, 0x26),
                heights: &[280.0, 320.0, 360.0, 400.0],
                frequency: 0.4,
                layer: Layer::Mid,
            },
            Archetype {
                kind: ElementKind::Building,
                color: Rgb::new(0x33, 0x33, 0x33),
                heights: &[180.0, 220.0, 260.0, 300.0],
                frequency: 0.45,
                layer: Layer::Front,
            },
        ],
    },
    Biome {
        name: "desert",
        ground_color: Rgb::new(0xb3, 0x94, 0x5f),
        sky_color: Rgb::new(0x7a, 0xb3, 0xd9),
        archetypes: &[
            Archetype {
                kind: ElementKind::Cloud,
                color: Rgb::new(0xff, 0xff, 0xff),
                heights: &[480.0, 530.0],
                frequency: 0.05,
                layer: Layer::Back,
            },
            Archetype {
                kind: ElementKind::Mountain,
                color: Rgb::new(0x99, 0x7a, 0x47),
                heights: &[300.0, 350.0, 400.0],
                frequency: 0.25,
                layer: Layer::Back,
            },
            Archetype {
                kind: ElementKind::Dune,
                color: Rgb::new(0xa3, 0x86, 0x54),
                heights: &[200.0, 250.0, 300.0],
                frequency: 0.35,
                layer: Layer::Mid,
            },
            Archetype {
                kind: ElementKind::Cactus,
                color: Rgb::new(0x1a, 0x33, 0x11),
                heights: &[100.0, 150.0, 200.0],
                frequency: 0.3,
                layer: Layer::Front,
            },
        ],
    },
    Biome {
        name: "island",
        ground_color: Rgb::new(0xe6, 0xc3, 0x66),
        sky_color: Rgb::new(0x4d, 0xa6, 0xff),
        archetypes: &[
            Archetype {
                kind: ElementKind::Cloud,
                color: Rgb::new(0xff, 0xff, 0xff),
                heights: &[450.0, 520.0],
                frequency: 0.2,
                layer: Layer::Back,
            },
            Archetype {
                kind: ElementKind::Mountain,
                color: Rgb::new(0x40, 0x40, 0x40),
                heights: &[320.0, 360.0, 400.0],
                frequency: 0.25,
                layer: Layer::Back,
            },
            Archetype {
                kind: ElementKind::Palm,
                color: Rgb::new(0x0e, 0x2a, 0x0e),
                heights: &[220.0, 260.0, 300.0],
                frequency: 0.35,
                layer: Layer::Mid,
            },
            Archetype {
                kind: ElementKind::Rock,
                color: Rgb::new(0x59, 0x59, 0x59),
                heights: &[120.0, 160.0, 200.0],
                frequency: 0.4,
                layer: Layer::Front,
            },
        ],
    },
];

/// A generated scenery instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    /// Position in the wrapped world coordinate space
    pub x: f32,
    pub height: f32,
    pub kind: ElementKind,
    pub color: Rgb,
    pub layer: Layer,
    /// Fade-in alpha, ramps 0 -> 1 once per lifetime
    pub opacity: f32,
    faded_in: bool,
}

impl Element {
    fn new(x: f32, height: f32, kind: ElementKind, color: Rgb, layer: Layer) -> Self {
        Self {
            x,
            height,
            kind,
            color,
            layer,
            opacity: 0.0,
            faded_in: false,
        }
    }

    /// Advance the one-shot fade-in ramp
    pub fn advance_fade(&mut self) {
        if self.faded_in {
            return;
        }
        self.opacity += FADE_IN_STEP;
        if self.opacity >= 1.0 {
            self.opacity = 1.0;
            self.faded_in = true;
        }
    }

    /// Restart the fade-in (used when a next-biome set is promoted)
    pub fn reset_fade(&mut self) {
        self.opacity = 0.0;
        self.faded_in = false;
    }

    /// Primary screen x plus an optional wrap ghost when the element sits
    /// within half its width of a wrap boundary (avoids a visible seam)
    pub fn screen_positions(&self, scroll_x: f32) -> (f32, Option<f32>) {
        let wrap = wrap_width();
        let x = (self.x + scroll_x * self.layer.scroll_factor()).rem_euclid(wrap);
        let half = self.kind.estimated_width() / 2.0;
        let ghost = if x < half {
            Some(x + wrap)
        } else if x > wrap - half {
            Some(x - wrap)
        } else {
            None
        };
        (x, ghost)
    }
}

/// Width of the wrapped background coordinate space
pub fn wrap_width() -> f32 {
    GAME_WIDTH * WRAP_FACTOR
}

/// Generate one biome's element set starting at `x_offset`.
///
/// Walks the virtual x-axis in fixed strides; each archetype rolls
/// independently per stride. An archetype with no candidate heights simply
/// never produces an element. Decorative extras land anywhere in the span,
/// independent of the stride walk.
pub fn generate_elements(biome_index: usize, x_offset: f32, rng: &mut impl Rng) -> Vec<Element> {
    let biome = &BIOMES[biome_index % BIOMES.len()];
    let mut elements = Vec::new();

    let mut x = x_offset;
    while x < x_offset + wrap_width() {
        for arch in biome.archetypes {
            if arch.heights.is_empty() || rng.random::<f32>() >= arch.frequency {
                continue;
            }
            let base = arch.heights[rng.random_range(0..arch.heights.len())];
            let jitter = (rng.random::<f32>() - 0.5) * base * 0.15;
            elements.push(Element::new(x, base + jitter, arch.kind, arch.color, arch.layer));
        }
        x += ELEMENT_STRIDE;
    }

    push_extras(biome, &mut elements, rng);
    elements
}

/// Biome-flavored decorations at fully random x positions
fn push_extras(biome: &Biome, elements: &mut Vec<Element>, rng: &mut impl Rng) {
    let span = GAME_WIDTH * 2.0;
    match biome.name {
        "mountains" => {
            for _ in 0..6 {
                elements.push(Element::new(
                    rng.random::<f32>() * span,
                    40.0 + rng.random::<f32>() * 30.0,
                    ElementKind::Cloud,
                    Rgb::new(0xe0, 0xe6, 0xed),
                    Layer::Back,
                ));
            }
        }
        "forest" => {
            for _ in 0..4 {
                elements.push(Element::new(
                    rng.random::<f32>() * span,
                    20.0,
                    ElementKind::Bird,
                    Rgb::new(0x22, 0x22, 0x22),
                    Layer::Mid,
                ));
            }
        }
        "island" => {
            for _ in 0..4 {
                elements.push(Element::new(
                    rng.random::<f32>() * span,
                    16.0,
                    ElementKind::Boat,
                    Rgb::new(0xa0, 0x52, 0x2d),
                    Layer::Front,
                ));
            }
        }
        "city" => {
            for _ in 0..4 {
                elements.push(Element::new(
                    rng.random::<f32>() * span,
                    40.0 + rng.random::<f32>() * 40.0,
                    ElementKind::Antenna,
                    Rgb::new(0x88, 0x88, 0x88),
                    Layer::Back,
                ));
            }
        }
        "desert" => {
            for _ in 0..6 {
                elements.push(Element::new(
                    rng.random::<f32>() * span,
                    15.0 + rng.random::<f32>() * 10.0,
                    ElementKind::Rock,
                    Rgb::new(0x8b, 0x6f, 0x3a),
                    Layer::Front,
                ));
            }
        }
        _ => {}
    }
}

/// The live backdrop: current + next element sets and the cross-fade state
#[derive(Debug, Clone)]
pub struct Backdrop {
    /// Index of the current biome in `BIOMES`
    pub current: usize,
    /// Cross-fade progress in [0, 1]
    pub transition: f32,
    pub elements: Vec<Element>,
    pub next_elements: Vec<Element>,
    /// Accumulated world scroll offset (decreases as the world moves left)
    pub scroll_x: f32,
}

impl Backdrop {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            current: 0,
            transition: 0.0,
            elements: generate_elements(0, 0.0, rng),
            next_elements: generate_elements(1, GAME_WIDTH, rng),
            scroll_x: 0.0,
        }
    }

    /// Index of the biome being faded in
    pub fn next_index(&self) -> usize {
        (self.current + 1) % BIOMES.len()
    }

    /// Blended sky color for the current transition progress
    pub fn sky_color(&self) -> Rgb {
        BIOMES[self.current]
            .sky_color
            .lerp(BIOMES[self.next_index()].sky_color, self.transition)
    }

    /// Blended ground color for the current transition progress
    pub fn ground_color(&self) -> Rgb {
        BIOMES[self.current]
            .ground_color
            .lerp(BIOMES[self.next_index()].ground_color, self.transition)
    }

    /// Advance one tick: scroll, fade-ins, and the cross-fade. Returns
    /// true when a biome swap completed this tick.
    pub fn advance(&mut self, speed: f32, rng: &mut impl Rng) -> bool {
        self.scroll_x -= speed * 0.5;

        for el in self.elements.iter_mut().chain(self.next_elements.iter_mut()) {
            el.advance_fade();
        }

        self.transition += TRANSITION_RATE * speed;
        if self.transition < 1.0 {
            return false;
        }

        // Swap: next becomes current (replaying its fade-in), fresh next
        // set lands one screen to the right
        self.current = self.next_index();
        self.transition = 0.0;
        self.elements = std::mem::take(&mut self.next_elements);
        for el in self.elements.iter_mut() {
            el.reset_fade();
        }
        self.next_elements = generate_elements(self.next_index(), GAME_WIDTH, rng);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_generation_covers_span() {
        let mut rng = Pcg32::seed_from_u64(3);
        let elements = generate_elements(0, 0.0, &mut rng);
        assert!(!elements.is_empty());
        // Stride-walk elements stay inside [offset, offset + span); extras
        // stay inside [0, 2 * GAME_WIDTH)
        for el in &elements {
            assert!(el.x >= 0.0 && el.x < wrap_width());
            assert_eq!(el.opacity, 0.0);
        }
    }

    #[test]
    fn test_generation_respects_offset() {
        let mut rng = Pcg32::seed_from_u64(3);
        let elements = generate_elements(1, GAME_WIDTH, &mut rng);
        let stride_walked = elements
            .iter()
            .filter(|e| e.kind == ElementKind::Mountain || e.kind == ElementKind::Cloud);
        // Extras for mountains are clouds below height 100; stride clouds
        // sit much higher
        for el in stride_walked {
            if el.height > 100.0 {
                assert!(el.x >= GAME_WIDTH);
            }
        }
    }

    #[test]
    fn test_height_jitter_within_bounds() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..20 {
            let elements = generate_elements(2, 0.0, &mut rng);
            for el in elements.iter().filter(|e| e.kind == ElementKind::Building) {
                // Candidate heights 180..=500 with +/- 7.5% jitter
                assert!(el.height >= 180.0 * 0.925);
                assert!(el.height <= 500.0 * 1.075);
            }
        }
    }

    #[test]
    fn test_fade_in_ramps_once() {
        let mut el = Element::new(0.0, 100.0, ElementKind::Tree, Rgb::new(0, 0, 0), Layer::Mid);
        for _ in 0..19 {
            el.advance_fade();
        }
        assert!(el.opacity < 1.0);
        el.advance_fade();
        assert_eq!(el.opacity, 1.0);
        // Further ticks are no-ops
        el.advance_fade();
        assert_eq!(el.opacity, 1.0);
        assert!(el.faded_in);
    }

    #[test]
    fn test_screen_positions_wrap() {
        let wrap = wrap_width();
        let mut el = Element::new(10.0, 100.0, ElementKind::Tree, Rgb::new(0, 0, 0), Layer::Mid);
        let (x, ghost) = el.screen_positions(0.0);
        assert_eq!(x, 10.0);
        assert_eq!(ghost, Some(10.0 + wrap));

        el.x = wrap - 5.0;
        let (x, ghost) = el.screen_positions(0.0);
        assert_eq!(x, wrap - 5.0);
        assert_eq!(ghost, Some(-5.0));

        el.x = wrap / 2.0;
        let (_, ghost) = el.screen_positions(0.0);
        assert_eq!(ghost, None);
    }

    #[test]
    fn test_screen_positions_scroll_parallax() {
        let el = Element::new(500.0, 100.0, ElementKind::Tree, Rgb::new(0, 0, 0), Layer::Back);
        let (x, _) = el.screen_positions(-100.0);
        assert!((x - 470.0).abs() < 1e-3);
    }

    #[test]
    fn test_transition_bounds_and_swap() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut backdrop = Backdrop::new(&mut rng);
        let mut swaps = 0;
        let mut last_biome = backdrop.current;
        // Fast speed to force several full transitions
        for _ in 0..400_000 {
            let changed = backdrop.advance(20.0, &mut rng);
            assert!((0.0..1.0 + TRANSITION_RATE * 20.0).contains(&backdrop.transition));
            if changed {
                assert_eq!(backdrop.transition, 0.0);
                assert_eq!(backdrop.current, (last_biome + 1) % BIOMES.len());
                last_biome = backdrop.current;
                swaps += 1;
            }
        }
        assert!(swaps >= 5, "expected a full biome cycle, got {} swaps", swaps);
    }

    #[test]
    fn test_swap_promotes_next_and_resets_fade() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut backdrop = Backdrop::new(&mut rng);
        // Let fades complete, then force a swap
        for _ in 0..30 {
            backdrop.advance(1.0, &mut rng);
        }
        let next_snapshot: Vec<f32> = backdrop.next_elements.iter().map(|e| e.x).collect();
        backdrop.transition = 1.0;
        backdrop.advance(1.0, &mut rng);
        assert_eq!(backdrop.current, 1);
        let current_xs: Vec<f32> = backdrop.elements.iter().map(|e| e.x).collect();
        assert_eq!(current_xs, next_snapshot);
        // Promoted elements replay their fade-in from zero
        for el in &backdrop.elements {
            assert_eq!(el.opacity, 0.0);
        }
    }

    #[test]
    fn test_color_blend_endpoints() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut backdrop = Backdrop::new(&mut rng);
        assert_eq!(backdrop.sky_color(), BIOMES[0].sky_color);
        backdrop.transition = 1.0;
        assert_eq!(backdrop.sky_color(), BIOMES[1].sky_color);
        assert_eq!(backdrop.ground_color(), BIOMES[1].ground_color);
    }
}
