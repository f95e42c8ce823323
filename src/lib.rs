//! contourwave - contour-banded Perlin/simplex noise patterns for LED matrices

pub mod audio;
pub mod cli;
pub mod contour;
pub mod error;
pub mod field;
pub mod noise;
pub mod params;
pub mod pattern;
pub mod rendering;
