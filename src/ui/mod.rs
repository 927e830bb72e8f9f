/// UI layer: widget panels, table rendering, and chart rendering.
pub mod panels;
pub mod plot;
pub mod table;
