//! # pcb2dxf
//!
//! Converts KiCad board descriptions (`.kicad_pcb`) into minimal DXF R12
//! drawings.
//!
//! The output holds an ENTITIES section only, optionally preceded by a
//! fixed HEADER/TABLES block. Entities are written as soon as they are
//! recognized; no drawing model is built in memory.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pcb2dxf::pcb::{convert_file, output_path_for, ConverterConfiguration};
//!
//! let input = "board.kicad_pcb";
//! let summary = convert_file(input, output_path_for(input), &ConverterConfiguration::default())?;
//! println!("{} entities written", summary.entities());
//! # Ok::<(), pcb2dxf::DxfError>(())
//! ```
//!
//! The entity writer can also be used on its own:
//!
//! ```rust
//! use pcb2dxf::io::dxf::write_r12;
//! use pcb2dxf::types::EntityAttributes;
//!
//! let bytes = write_r12(Vec::new(), false, |dxf| {
//!     dxf.add_line((0.0, 0.0), (10.0, 0.0), &EntityAttributes::on_layer("Edge").with_color(2))?;
//!     dxf.add_circle((5.0, 5.0), 2.5, &EntityAttributes::default())
//! })?;
//! assert!(String::from_utf8(bytes).unwrap().ends_with("0\nENDSEC\n0\nEOF\n"));
//! # Ok::<(), pcb2dxf::DxfError>(())
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod io;
pub mod pcb;
pub mod types;

pub use error::{DxfError, Result};
pub use io::dxf::{write_r12, write_r12_file, R12Writer, TextOptions};
pub use types::{EntityAttributes, InvisibleEdgeFlags, TextAlignment, Vector2, Vector3, Vertex};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
