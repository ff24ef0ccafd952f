use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::immutable::ImmutableList;
use crate::mutable::{MutableList, MutableSubList};
use crate::sequence::{SequenceCore, SequenceExt};

// Sequences serialize as the list of their values, forcing every element.
fn serialize_sequence<S, Q>(sequence: &Q, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    Q: SequenceCore + ?Sized,
    Q::Item: Serialize,
{
    let mut seq = serializer.serialize_seq(Some(sequence.len()))?;
    for value in sequence.iter() {
        seq.serialize_element(value)?;
    }
    seq.end()
}

impl<T: Serialize> Serialize for ImmutableList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_sequence(self, serializer)
    }
}

impl<T: Serialize> Serialize for MutableList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_sequence(self, serializer)
    }
}

impl<T: Serialize> Serialize for MutableSubList<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_sequence(self, serializer)
    }
}
