pub mod newtype_index;
pub mod type_name;
