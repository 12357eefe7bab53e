#[macro_use]
extern crate quickcheck_macros;

use quickcheck::{Arbitrary, Gen};

#[path = "../common/mod.rs"]
mod common;
mod tree;

/// An enum for the various kinds of "things" to do to
/// a tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op {
    /// Insert the key into the tree
    Insert(i8),
    /// Delete the key from the tree
    Delete(i8),
}

impl Arbitrary for Op {
    /// Tells quickcheck how to randomly choose an operation
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Insert(i8::arbitrary(g))
        } else {
            Op::Delete(i8::arbitrary(g))
        }
    }
}
