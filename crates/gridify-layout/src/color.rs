#![forbid(unsafe_code)]

//! Default colors for newly added items.

/// Supplies the color assigned to each new item.
pub trait ColorSource {
    fn next_color(&mut self) -> String;
}

impl<F: FnMut() -> String> ColorSource for F {
    fn next_color(&mut self) -> String {
        self()
    }
}

/// Seeded palette of saturated mid-lightness HSL colors.
///
/// Produces `hsl(H, S%, L%)` with `H` in `0..360`, `S` in `70..100` and
/// `L` in `40..60`. The same seed always yields the same sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HslPalette {
    state: u64,
}

impl HslPalette {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        // High bits of an LCG are the well-mixed ones.
        self.state >> 33
    }

    fn next_in(&mut self, lo: u64, span: u64) -> u64 {
        lo + self.next_u64() % span
    }
}

impl Default for HslPalette {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ColorSource for HslPalette {
    fn next_color(&mut self) -> String {
        let hue = self.next_in(0, 360);
        let saturation = self.next_in(70, 30);
        let lightness = self.next_in(40, 20);
        format!("hsl({hue}, {saturation}%, {lightness}%)")
    }
}
