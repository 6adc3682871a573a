//! Unit conversions and page sizes, in PostScript points.

/// Points per millimetre.
pub const MM: f32 = 72.0 / 25.4;

/// Points per inch.
pub const INCH: f32 = 72.0;

/// ISO A4 page size.
pub const A4: (f32, f32) = (210.0 * MM, 297.0 * MM);

/// US Letter page size.
pub const LETTER: (f32, f32) = (612.0, 792.0);
