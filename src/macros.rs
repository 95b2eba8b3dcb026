//! # Internal Macros
//!
//! ## zerocopy_accessors!
//!
//! Generates getter and setter methods for zerocopy struct fields stored as
//! little-endian wrapper types. On-disk headers keep their integers in these
//! wrappers so that the struct is `Unaligned` and can be viewed at any offset
//! in a page buffer.
//!
//! ### Usage
//!
//! ```ignore
//! use zerocopy::little_endian::U32;
//!
//! #[repr(C)]
//! struct Header {
//!     cell_count: U32,
//! }
//!
//! impl Header {
//!     zerocopy_accessors! {
//!         cell_count: u32,
//!     }
//! }
//!
//! // Generates:
//! // pub fn cell_count(&self) -> u32 { self.cell_count.get() }
//! // pub fn set_cell_count(&mut self, val: u32) { self.cell_count = U32::new(val); }
//! ```

/// Generates getter and setter methods for zerocopy little-endian fields.
#[macro_export]
macro_rules! zerocopy_accessors {
    (@impl $field:ident, u32) => {
        ::paste::paste! {
            #[inline]
            pub fn $field(&self) -> u32 {
                self.$field.get()
            }

            #[inline]
            pub fn [<set_ $field>](&mut self, val: u32) {
                self.$field = ::zerocopy::little_endian::U32::new(val);
            }
        }
    };
    ($($field:ident : $ty:tt),* $(,)?) => {
        $(
            $crate::zerocopy_accessors!(@impl $field, $ty);
        )*
    };
}
