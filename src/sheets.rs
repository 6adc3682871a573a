//! Catalog of physical label sheet formats.
//!
//! All dimensions are in points, measured the way the vendor data sheets
//! give them: cell size, gutter between adjacent cells, and the margin from
//! the page edge to the first cell.

use crate::units::{A4, INCH, LETTER, MM};
use crate::LabelError;

/// Physical parameters of one sheet format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetFormat {
    /// Number of label cells across the page.
    pub across: u32,
    /// Number of label cells down the page.
    pub down: u32,
    /// Width and height of one cell.
    pub cell: (f32, f32),
    /// Horizontal and vertical spacing between adjacent cells.
    pub gutter: (f32, f32),
    /// Left and top page margin.
    pub margin: (f32, f32),
    /// Page width and height.
    pub page: (f32, f32),
}

/// All known format names, in ascending order.
pub const FORMAT_NAMES: [&str; 11] = [
    "avery3657",
    "avery5160",
    "avery5161",
    "avery5163",
    "avery5167",
    "avery5371",
    "averyL4731",
    "averyL4732",
    "herma10003",
    "herma4201",
    "herma4346",
];

/// Looks up a sheet format by name.
pub fn lookup(name: &str) -> Result<SheetFormat, LabelError> {
    let format = match name {
        "averyL4731" => SheetFormat {
            across: 7,
            down: 27,
            cell: (25.4 * MM, 10.0 * MM),
            gutter: (2.5 * MM, 0.0),
            margin: (9.0 * MM, 13.5 * MM),
            page: A4,
        },
        "averyL4732" => SheetFormat {
            across: 5,
            down: 16,
            cell: (35.6 * MM, 16.9 * MM),
            gutter: (2.5 * MM, 0.0),
            margin: (11.0 * MM, 13.5 * MM),
            page: A4,
        },
        // 2.6 x 1 address labels
        "avery5160" => SheetFormat {
            across: 3,
            down: 10,
            cell: (187.0, 72.0),
            gutter: (11.0, 0.0),
            margin: (14.0, 36.0),
            page: LETTER,
        },
        "avery5161" => SheetFormat {
            across: 2,
            down: 10,
            cell: (288.0, 72.0),
            gutter: (0.0, 0.0),
            margin: (18.0, 36.0),
            page: LETTER,
        },
        // 4 x 2 address labels
        "avery5163" => SheetFormat {
            across: 2,
            down: 5,
            cell: (288.0, 144.0),
            gutter: (0.0, 0.0),
            margin: (18.0, 36.0),
            page: LETTER,
        },
        // 1.75 x 0.5 return address labels
        "avery5167" => SheetFormat {
            across: 4,
            down: 20,
            cell: (1.75 * INCH, 0.5 * INCH),
            gutter: (0.3 * INCH, 0.0),
            margin: (0.3 * INCH, 0.5 * INCH),
            page: LETTER,
        },
        // 3.5 x 2 business cards
        "avery5371" => SheetFormat {
            across: 2,
            down: 5,
            cell: (252.0, 144.0),
            gutter: (0.0, 0.0),
            margin: (54.0, 36.0),
            page: LETTER,
        },
        // Herma 4201, 64 removable labels
        "herma4201" => SheetFormat {
            across: 4,
            down: 16,
            cell: (45.7 * MM, 16.9 * MM),
            gutter: (2.5 * MM, 0.0),
            margin: (8.0 * MM, 13.0 * MM),
            page: A4,
        },
        // HERMA No. 10003 labels (former article No. 4345)
        "herma10003" => SheetFormat {
            across: 5,
            down: 16,
            cell: (35.56 * MM, 16.93 * MM),
            gutter: (2.54 * MM, 0.0),
            margin: (11.02 * MM, 13.06 * MM),
            page: A4,
        },
        "herma4346" => SheetFormat {
            across: 4,
            down: 12,
            cell: (45.72 * MM, 21.167 * MM),
            gutter: (2.54 * MM, 0.0),
            margin: (9.75 * MM, 21.5 * MM),
            page: A4,
        },
        // Avery 3657 (48.5mm x 25.4mm)
        "avery3657" => SheetFormat {
            across: 4,
            down: 10,
            cell: (48.5 * MM, 25.4 * MM),
            gutter: (0.0, 0.0),
            margin: (8.0 * MM, 21.75 * MM),
            page: A4,
        },
        _ => return Err(LabelError::UnknownFormat(name.to_string())),
    };
    Ok(format)
}
