//! Label grid position engine and the per-label render loop.
//!
//! A [`LabelSheet`] owns the fill position of one print job: it maps the
//! running label index onto grid slots, turns slots into page coordinates,
//! and rolls over to a fresh page exactly once per filled sheet. The engine
//! performs no bounds-checking beyond the construction-time clamp of the
//! start position; stopping is the caller's responsibility.

use crate::canvas::Canvas;
use crate::sheets::SheetFormat;
use crate::LabelError;

/// Order in which the running label index walks the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOrder {
    /// Fill down each column before moving to the next column.
    ColumnMajor,
    /// Fill across each row before moving down.
    RowMajor,
}

/// Where on the sheet the first label goes, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPosition {
    /// Absolute label count.
    Cell(u32),
    /// (row, column) pair.
    RowColumn(u32, u32),
}

/// Per-job configuration for a [`LabelSheet`].
#[derive(Debug, Clone, Copy)]
pub struct SheetOptions {
    pub fill_order: FillOrder,
    /// Stroke each cell's bounds, for checking printer alignment.
    pub debug_border: bool,
    pub start: Option<StartPosition>,
    /// Added to the format's margins, for printer calibration.
    pub margin_offset: (f32, f32),
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            fill_order: FillOrder::ColumnMajor,
            debug_border: false,
            start: None,
            margin_offset: (0.0, 0.0),
        }
    }
}

/// Grid state of one print job.
pub struct LabelSheet {
    across: u32,
    down: u32,
    cell: (f32, f32),
    /// Cell size plus gutter, per axis.
    step: (f32, f32),
    margin: (f32, f32),
    page: (f32, f32),
    fill_order: FillOrder,
    debug_border: bool,
    /// Zero-based index of the next label to fill.
    position: u32,
}

impl LabelSheet {
    pub fn new(format: &SheetFormat, options: &SheetOptions) -> Self {
        debug_assert!(format.across >= 1 && format.down >= 1);

        let mut sheet = Self {
            across: format.across,
            down: format.down,
            cell: format.cell,
            step: (
                format.cell.0 + format.gutter.0,
                format.cell.1 + format.gutter.1,
            ),
            margin: (
                format.margin.0 + options.margin_offset.0,
                format.margin.1 + options.margin_offset.1,
            ),
            page: format.page,
            fill_order: options.fill_order,
            debug_border: options.debug_border,
            position: 0,
        };
        sheet.position = sheet.resolve_start(options.start);
        sheet
    }

    /// Number of labels on one sheet.
    pub fn capacity(&self) -> u32 {
        self.across * self.down
    }

    /// Zero-based index of the next label to fill.
    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn page_size(&self) -> (f32, f32) {
        self.page
    }

    /// Resolves a start position into a zero-based offset. Out-of-range
    /// positions saturate to the last cell of the sheet.
    fn resolve_start(&self, start: Option<StartPosition>) -> u32 {
        let offset = match start {
            Some(StartPosition::RowColumn(row, column)) => {
                let row = row.max(1);
                let column = column.max(1);
                match self.fill_order {
                    FillOrder::ColumnMajor => {
                        (column - 1).saturating_mul(self.down).saturating_add(row - 1)
                    }
                    FillOrder::RowMajor => {
                        (row - 1).saturating_mul(self.across).saturating_add(column - 1)
                    }
                }
            }
            Some(StartPosition::Cell(count)) => count.saturating_sub(1),
            None => 0,
        };
        offset.min(self.capacity() - 1)
    }

    /// Grid slot of a linear index, as (across, down) cell coordinates.
    fn slot(&self, index: u32) -> (u32, u32) {
        match self.fill_order {
            FillOrder::ColumnMajor => (index / self.down, index % self.down),
            FillOrder::RowMajor => (index % self.across, index / self.across),
        }
    }

    /// Bottom-left corner of cell `index` in page coordinates.
    ///
    /// Grid row 0 is the topmost row while page Y grows upward, hence the
    /// inversion against the page height.
    pub fn cell_origin(&self, index: u32) -> (f32, f32) {
        let (across_idx, down_idx) = self.slot(index);
        (
            self.margin.0 + across_idx as f32 * self.step.0,
            self.page.1 - self.margin.1 - (down_idx + 1) as f32 * self.step.1,
        )
    }

    /// Moves to the next label. Filling the last cell of the sheet ends the
    /// page and resets the position; this is the only rollover trigger.
    pub fn advance<C: Canvas>(&mut self, canvas: &mut C) {
        self.position += 1;
        if self.position == self.capacity() {
            canvas.end_page();
            self.position = 0;
        }
    }

    /// Renders `count` labels, one cell each, spilling across pages as
    /// needed. `content` draws in label-local coordinates and is handed the
    /// cell width and height.
    pub fn render_count<C, F>(
        &mut self,
        canvas: &mut C,
        mut content: F,
        count: u32,
    ) -> Result<(), LabelError>
    where
        C: Canvas,
        F: FnMut(&mut C, f32, f32) -> Result<(), LabelError>,
    {
        for _ in 0..count {
            self.render_one(canvas, &mut content)?;
        }
        Ok(())
    }

    /// Renders one label per item of `items`, until the sequence is
    /// exhausted. The item is passed through to `content`.
    pub fn render_iter<C, I, F>(
        &mut self,
        canvas: &mut C,
        mut content: F,
        items: I,
    ) -> Result<(), LabelError>
    where
        C: Canvas,
        I: IntoIterator,
        F: FnMut(&mut C, f32, f32, I::Item) -> Result<(), LabelError>,
    {
        for item in items {
            self.render_one(canvas, |canvas, width, height| {
                content(canvas, width, height, item)
            })?;
        }
        Ok(())
    }

    fn render_one<C, F>(&mut self, canvas: &mut C, content: F) -> Result<(), LabelError>
    where
        C: Canvas,
        F: FnOnce(&mut C, f32, f32) -> Result<(), LabelError>,
    {
        canvas.save_state();
        let (x, y) = self.cell_origin(self.position);
        canvas.translate(x, y);
        if self.debug_border {
            canvas.set_line_width(0.25);
            canvas.rect_outline(0.0, 0.0, self.cell.0, self.cell.1);
        }
        let drawn = content(canvas, self.cell.0, self.cell.1);
        canvas.restore_state();
        drawn?;
        self.advance(canvas);
        Ok(())
    }

    /// Ends the in-progress page if it holds any labels. A position of zero
    /// means the last `advance` already rolled the page over.
    pub fn close<C: Canvas>(&mut self, canvas: &mut C) {
        if self.position != 0 {
            canvas.end_page();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;
    use crate::sheets::lookup;

    fn sheet(name: &str, options: SheetOptions) -> LabelSheet {
        LabelSheet::new(&lookup(name).unwrap(), &options)
    }

    fn with_start(start: StartPosition, fill_order: FillOrder) -> SheetOptions {
        SheetOptions {
            fill_order,
            start: Some(start),
            ..SheetOptions::default()
        }
    }

    fn noop(_: &mut RecordingCanvas, _: f32, _: f32) -> Result<(), LabelError> {
        Ok(())
    }

    #[test]
    fn slot_round_trips_column_major() {
        let s = sheet("avery5160", SheetOptions::default());
        for index in 0..s.capacity() {
            let (across_idx, down_idx) = s.slot(index);
            assert!(across_idx < s.across && down_idx < s.down);
            assert_eq!(across_idx * s.down + down_idx, index);
        }
    }

    #[test]
    fn slot_round_trips_row_major() {
        let options = SheetOptions {
            fill_order: FillOrder::RowMajor,
            ..SheetOptions::default()
        };
        let s = sheet("avery5160", options);
        for index in 0..s.capacity() {
            let (across_idx, down_idx) = s.slot(index);
            assert!(across_idx < s.across && down_idx < s.down);
            assert_eq!(down_idx * s.across + across_idx, index);
        }
    }

    #[test]
    fn row_column_start_matches_linear_count() {
        // Column-major on 3x10: (row 1, column 2) is the 11th label.
        let by_pair = sheet(
            "avery5160",
            with_start(StartPosition::RowColumn(1, 2), FillOrder::ColumnMajor),
        );
        let by_count = sheet(
            "avery5160",
            with_start(StartPosition::Cell(11), FillOrder::ColumnMajor),
        );
        assert_eq!(by_pair.position(), 10);
        assert_eq!(by_pair.position(), by_count.position());
    }

    #[test]
    fn row_column_start_row_major() {
        let s = sheet(
            "avery5160",
            with_start(StartPosition::RowColumn(2, 1), FillOrder::RowMajor),
        );
        assert_eq!(s.position(), 3);
    }

    #[test]
    fn start_position_saturates_to_last_cell() {
        let by_pair = sheet(
            "avery5160",
            with_start(StartPosition::RowColumn(100, 100), FillOrder::ColumnMajor),
        );
        assert_eq!(by_pair.position(), 29);

        let by_count = sheet(
            "avery5160",
            with_start(StartPosition::Cell(1000), FillOrder::ColumnMajor),
        );
        assert_eq!(by_count.position(), 29);
    }

    #[test]
    fn start_position_floors_to_first_cell() {
        let s = sheet(
            "avery5160",
            with_start(StartPosition::RowColumn(0, 0), FillOrder::ColumnMajor),
        );
        assert_eq!(s.position(), 0);
    }

    #[test]
    fn first_cell_origin() {
        let s = sheet("avery5160", SheetOptions::default());
        assert_eq!(s.cell_origin(0), (14.0, 792.0 - 36.0 - 72.0));
    }

    #[test]
    fn second_cell_origin_depends_on_fill_order() {
        let down_first = sheet("avery5160", SheetOptions::default());
        assert_eq!(down_first.cell_origin(1), (14.0, 612.0));

        let across_first = sheet(
            "avery5160",
            SheetOptions {
                fill_order: FillOrder::RowMajor,
                ..SheetOptions::default()
            },
        );
        assert_eq!(across_first.cell_origin(1), (212.0, 684.0));
    }

    #[test]
    fn margin_offset_shifts_origins() {
        let options = SheetOptions {
            margin_offset: (5.0, -3.0),
            ..SheetOptions::default()
        };
        let s = sheet("avery5160", options);
        assert_eq!(s.cell_origin(0), (19.0, 792.0 - 33.0 - 72.0));
    }

    #[test]
    fn advancing_through_a_full_sheet_rolls_over_once() {
        let mut canvas = RecordingCanvas::default();
        let mut s = sheet("avery5160", SheetOptions::default());
        for _ in 0..s.capacity() {
            s.advance(&mut canvas);
        }
        assert_eq!(canvas.pages_ended, 1);
        assert_eq!(s.position(), 0);
    }

    #[test]
    fn exact_multiple_of_capacity_ends_that_many_pages() {
        let mut canvas = RecordingCanvas::default();
        let mut s = sheet("avery5160", SheetOptions::default());
        let count = 2 * s.capacity();

        s.render_count(&mut canvas, noop, count).unwrap();
        assert_eq!(canvas.pages_ended, 2);
        assert_eq!(s.position(), 0);

        // The final advance already rolled the page; close adds nothing.
        s.close(&mut canvas);
        assert_eq!(canvas.pages_ended, 2);
    }

    #[test]
    fn partial_page_is_ended_by_close() {
        let mut canvas = RecordingCanvas::default();
        let mut s = sheet("avery5160", SheetOptions::default());
        let count = s.capacity() + 1;

        s.render_count(&mut canvas, noop, count).unwrap();
        assert_eq!(canvas.pages_ended, 1);
        assert_eq!(s.position(), 1);

        s.close(&mut canvas);
        assert_eq!(canvas.pages_ended, 2);
    }

    #[test]
    fn state_is_restored_when_content_fails() {
        let mut canvas = RecordingCanvas::default();
        let mut s = sheet("avery5160", SheetOptions::default());

        let result = s.render_count(
            &mut canvas,
            |_, _, _| Err(LabelError::Qr("boom".into())),
            3,
        );
        assert!(result.is_err());
        assert_eq!(canvas.saves, 1);
        assert_eq!(canvas.restores, 1);
        assert_eq!(s.position(), 0);
    }

    #[test]
    fn render_starts_at_resolved_offset() {
        let mut canvas = RecordingCanvas::default();
        let mut s = sheet(
            "avery5160",
            with_start(StartPosition::Cell(11), FillOrder::ColumnMajor),
        );
        let expected = s.cell_origin(10);

        s.render_count(&mut canvas, noop, 1).unwrap();
        assert_eq!(canvas.translates[0], expected);
    }

    #[test]
    fn render_iter_stops_on_exhaustion() {
        let mut canvas = RecordingCanvas::default();
        let mut s = sheet("avery5160", SheetOptions::default());
        let items = ["a", "b", "c", "d", "e"];

        s.render_iter(
            &mut canvas,
            |canvas, _, height, item| {
                canvas.text(item, 10.0, 0.0, height / 2.0);
                Ok(())
            },
            items,
        )
        .unwrap();

        assert_eq!(s.position(), 5);
        assert_eq!(canvas.texts.len(), 5);
        assert_eq!(canvas.translates.len(), 5);
        assert_eq!(canvas.translates[0], s.cell_origin(0));
        assert_eq!(canvas.translates[4], s.cell_origin(4));
    }

    #[test]
    fn debug_border_outlines_the_cell() {
        let mut canvas = RecordingCanvas::default();
        let mut s = sheet(
            "avery5160",
            SheetOptions {
                debug_border: true,
                ..SheetOptions::default()
            },
        );

        s.render_count(&mut canvas, noop, 1).unwrap();
        assert_eq!(canvas.rects, vec![(0.0, 0.0, 187.0, 72.0)]);
    }
}
