//! Channel membership for edge segments.

use bitflags::bitflags;

bitflags! {
    /// The subset of color channels an edge contributes distances to.
    ///
    /// Multi-channel generation assigns each edge some of the channels
    /// {red, green, blue} so that the two edges meeting at a corner share
    /// exactly one channel. Membership is a plain bitwise test, and the
    /// complement within [`EdgeColor::WHITE`] is well defined.
    #[derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        serde::Serialize,
        serde::Deserialize,
    )]
    pub struct EdgeColor: u8 {
        /// The red channel.
        const RED = 0b001;
        /// The green channel.
        const GREEN = 0b010;
        /// The blue channel.
        const BLUE = 0b100;
        /// Red and green.
        const YELLOW = 0b011;
        /// Green and blue.
        const CYAN = 0b110;
        /// Red and blue.
        const MAGENTA = 0b101;
        /// All three channels.
        const WHITE = 0b111;
    }
}

impl EdgeColor {
    /// No channels. Edges colored black are invisible to the
    /// multi-channel selectors.
    pub const BLACK: EdgeColor = EdgeColor::empty();

    /// The number of channels in this set.
    #[inline]
    pub fn channel_count(self) -> u32 {
        self.bits().count_ones()
    }
}

impl Default for EdgeColor {
    fn default() -> Self {
        EdgeColor::WHITE
    }
}
