mod arena;
mod cursor;
mod handle;
mod node;
mod raw_ordered_map;
mod size;

pub(crate) use cursor::Cursor;
pub(crate) use node::Side;
pub(crate) use raw_ordered_map::RawOrderedMap;
