//! Helper macros shared by the request, filter and output types.
//!
//! - [`getter_fn!`](crate::getter_fn) generates a borrowing accessor for a
//!   struct field.
//! - [`with_field_fn!`](crate::with_field_fn) generates a builder-style
//!   `with_<field>` setter that consumes and returns `self`.

#[macro_export]
macro_rules! getter_fn {
    ($field_name: ident, $field_type: ty) => {
        #[cfg_attr(coverage_nightly, coverage(off))]
        pub fn $field_name(&self) -> &$field_type {
            &self.$field_name
        }
    };
}
pub use getter_fn;

#[macro_export]
macro_rules! with_field_fn {
    ($field_name: ident, $field_type: ty) => {
        paste::paste! {
            #[cfg_attr(coverage_nightly, coverage(off))]
            pub fn [<with_$field_name>](mut self, value: $field_type) -> Self {
                self.$field_name = value;
                self
            }
        }
    };
}
pub use with_field_fn;
