/// Pack decode command.
pub mod decode;
/// JSON to pack encode command.
pub mod encode;
/// Pack structure summary command.
pub mod info;
/// Conversion between JSON documents and value trees.
pub(crate) mod json;
/// Indented value tree printer.
pub mod print;
pub(crate) mod util;
