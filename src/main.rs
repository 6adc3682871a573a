// asn-labels: Generate ASN label sheets with QR codes for document archiving

use clap::builder::PossibleValuesParser;
use clap::Parser;

use asn_labels::{
    lookup, AsnLabel, FillOrder, LabelError, LabelSheet, PdfCanvas, SheetOptions, StartPosition,
    FORMAT_NAMES,
};

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(
    name = "asn-labels",
    version,
    about = "Generate archive serial number (ASN) label sheets with QR codes"
)]
struct Args {
    /// The value of the first ASN
    start_asn: u32,

    /// The output file to write to
    #[arg(default_value = "labels.pdf")]
    output_file: String,

    /// Label sheet format
    #[arg(short, long, default_value = "averyL4731",
          value_parser = PossibleValuesParser::new(FORMAT_NAMES))]
    format: String,

    /// Number of digits in the ASN (7 produces "ASN0000001")
    #[arg(short, long, default_value_t = 7)]
    digits: usize,

    /// Display borders around labels, useful for debugging the printer alignment
    #[arg(short, long)]
    border: bool,

    /// Increment the ASNs row-wise, go from left to right
    #[arg(short, long)]
    row_wise: bool,

    /// Number of labels to be printed on the sheet
    #[arg(short, long)]
    num_labels: Option<u32>,

    /// Number of pages to be printed, ignored if NUM_LABELS is set
    #[arg(short, long, default_value_t = 1)]
    pages: u32,

    /// Starting position on the sheet, either as ROW:COLUMN or COUNT, both
    /// starting from 1 (default: 1:1 or 1)
    #[arg(short, long, value_parser = parse_start_position)]
    start_position: Option<StartPosition>,
}

/// Matches the starting position parameter. Allows ROW:COLUMN (1-2 digits
/// each) or a bare 1-based count.
fn parse_start_position(arg: &str) -> Result<StartPosition, LabelError> {
    let invalid = || LabelError::InvalidStartPosition(arg.to_string());
    let coordinate = |part: &str| {
        if (1..=2).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit()) {
            part.parse::<u32>().map_err(|_| invalid())
        } else {
            Err(invalid())
        }
    };

    if let Some((row, column)) = arg.split_once(':') {
        Ok(StartPosition::RowColumn(coordinate(row)?, coordinate(column)?))
    } else if !arg.is_empty() && arg.bytes().all(|b| b.is_ascii_digit()) {
        arg.parse::<u32>().map(StartPosition::Cell).map_err(|_| invalid())
    } else {
        Err(invalid())
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), LabelError> {
    let args = Args::parse();

    let format = lookup(&args.format)?;
    let options = SheetOptions {
        fill_order: if args.row_wise {
            FillOrder::RowMajor
        } else {
            FillOrder::ColumnMajor
        },
        debug_border: args.border,
        start: args.start_position,
        ..SheetOptions::default()
    };

    let mut sheet = LabelSheet::new(&format, &options);
    let mut canvas = PdfCanvas::new("ASN labels", sheet.page_size())?;
    let mut label = AsnLabel::new(args.start_asn, args.digits);

    // Explicit label count, otherwise pages worth of labels minus the start
    // offset.
    let start_offset = sheet.position();
    let count = args.num_labels.unwrap_or_else(|| {
        args.pages
            .saturating_mul(sheet.capacity())
            .saturating_sub(start_offset)
    });

    sheet.render_count(&mut canvas, |canvas, w, h| label.render(canvas, w, h), count)?;
    sheet.close(&mut canvas);
    canvas.save(&args.output_file)?;

    let pages_written = start_offset
        .saturating_add(count)
        .div_ceil(sheet.capacity())
        .max(1);
    println!("✓ Generated: {}", args.output_file);
    println!("  Format: {}", args.format);
    println!("  Labels: {} on {} page(s)", count, pages_written);
    if count > 0 {
        println!(
            "  Range: ASN{first:0digits$} - ASN{last:0digits$}",
            first = args.start_asn,
            last = args.start_asn.saturating_add(count - 1),
            digits = args.digits,
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bare_count() {
        assert_eq!(parse_start_position("11").unwrap(), StartPosition::Cell(11));
        assert_eq!(parse_start_position("0").unwrap(), StartPosition::Cell(0));
    }

    #[test]
    fn accepts_row_column_pair() {
        assert_eq!(
            parse_start_position("2:3").unwrap(),
            StartPosition::RowColumn(2, 3)
        );
        assert_eq!(
            parse_start_position("27:07").unwrap(),
            StartPosition::RowColumn(27, 7)
        );
    }

    #[test]
    fn rejects_malformed_positions() {
        for arg in ["abc", "1:2:3", "123:1", "1:", ":2", "", "-1", "1.5"] {
            assert!(
                parse_start_position(arg).is_err(),
                "{arg:?} should be rejected"
            );
        }
    }
}
