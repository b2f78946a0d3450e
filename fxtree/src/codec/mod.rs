//! Codec layer: positional text files, FXML export, and tree views
//!
//! Every function here works on a fully built `ComponentTree`; file handles
//! are opened and closed within the call.

pub mod error;
pub mod markup;
pub mod outline;
pub mod positional;

pub use error::{CodecError, CodecResult, IoResultExt};
pub use markup::{
    export_markup, read_markup_file, render_markup, text_area_id, write_markup, MarkupExporter,
    MarkupOptions,
};
pub use outline::TreeNodeConvert;
pub use positional::{
    load_tree, read_tree, render_annotated, render_outline, save_outline, write_annotated,
    write_outline, Entry, EntryError,
};
