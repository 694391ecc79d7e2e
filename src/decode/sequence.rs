//! Homogeneous list and fixed-arity tuple decoding.

use stillwater::Validation;

use crate::decode::traits::Decoder;
use crate::decode::wrong_type;
use crate::error::{ConvertFailure, FailureReason, Failures};
use crate::result::{sequence, DecodeResult, DecodeResultExt};
use crate::tree::{ConfigValue, ConfigValueType};

/// Decodes every element of an array with one element decoder.
///
/// Elements decode independently; failures from all of them accumulate,
/// each with its index prepended to the path. An empty array is a valid
/// empty `Vec`.
pub struct ListDecoder<D> {
    element: D,
}

impl<D> ListDecoder<D> {
    pub fn new(element: D) -> Self {
        Self { element }
    }
}

impl<D: Decoder> Decoder for ListDecoder<D> {
    type Output = Vec<D::Output>;

    fn decode(&self, value: &ConfigValue) -> DecodeResult<Self::Output> {
        let items = match value.as_array() {
            Some(items) => items,
            None => return wrong_type(value, &[ConfigValueType::Array]),
        };

        sequence(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| self.element.decode(item).at_index(i)),
        )
    }
}

/// A heterogeneous run of positional decoders, one per tuple slot.
///
/// Implemented for tuples of decoders up to arity six; larger products
/// are records, not tuples.
pub trait TupleDecode: Send + Sync {
    type Output;

    /// The number of elements the input array must have.
    fn arity(&self) -> usize;

    /// Decodes `items`, whose length is already known to equal
    /// [`arity`](TupleDecode::arity).
    fn decode_items(&self, items: &[ConfigValue]) -> DecodeResult<Self::Output>;
}

impl<A: Decoder, B: Decoder> TupleDecode for (A, B) {
    type Output = (A::Output, B::Output);

    fn arity(&self) -> usize {
        2
    }

    fn decode_items(&self, items: &[ConfigValue]) -> DecodeResult<Self::Output> {
        self.0
            .decode(&items[0])
            .at_index(0)
            .zip(self.1.decode(&items[1]).at_index(1))
    }
}

impl<A: Decoder, B: Decoder, C: Decoder> TupleDecode for (A, B, C) {
    type Output = (A::Output, B::Output, C::Output);

    fn arity(&self) -> usize {
        3
    }

    fn decode_items(&self, items: &[ConfigValue]) -> DecodeResult<Self::Output> {
        self.0
            .decode(&items[0])
            .at_index(0)
            .zip(self.1.decode(&items[1]).at_index(1))
            .zip(self.2.decode(&items[2]).at_index(2))
            .map(|((a, b), c)| (a, b, c))
    }
}

impl<A: Decoder, B: Decoder, C: Decoder, D: Decoder> TupleDecode for (A, B, C, D) {
    type Output = (A::Output, B::Output, C::Output, D::Output);

    fn arity(&self) -> usize {
        4
    }

    fn decode_items(&self, items: &[ConfigValue]) -> DecodeResult<Self::Output> {
        self.0
            .decode(&items[0])
            .at_index(0)
            .zip(self.1.decode(&items[1]).at_index(1))
            .zip(self.2.decode(&items[2]).at_index(2))
            .zip(self.3.decode(&items[3]).at_index(3))
            .map(|(((a, b), c), d)| (a, b, c, d))
    }
}

impl<A: Decoder, B: Decoder, C: Decoder, D: Decoder, E: Decoder> TupleDecode for (A, B, C, D, E) {
    type Output = (A::Output, B::Output, C::Output, D::Output, E::Output);

    fn arity(&self) -> usize {
        5
    }

    fn decode_items(&self, items: &[ConfigValue]) -> DecodeResult<Self::Output> {
        self.0
            .decode(&items[0])
            .at_index(0)
            .zip(self.1.decode(&items[1]).at_index(1))
            .zip(self.2.decode(&items[2]).at_index(2))
            .zip(self.3.decode(&items[3]).at_index(3))
            .zip(self.4.decode(&items[4]).at_index(4))
            .map(|((((a, b), c), d), e)| (a, b, c, d, e))
    }
}

impl<A: Decoder, B: Decoder, C: Decoder, D: Decoder, E: Decoder, F: Decoder> TupleDecode
    for (A, B, C, D, E, F)
{
    type Output = (
        A::Output,
        B::Output,
        C::Output,
        D::Output,
        E::Output,
        F::Output,
    );

    fn arity(&self) -> usize {
        6
    }

    fn decode_items(&self, items: &[ConfigValue]) -> DecodeResult<Self::Output> {
        self.0
            .decode(&items[0])
            .at_index(0)
            .zip(self.1.decode(&items[1]).at_index(1))
            .zip(self.2.decode(&items[2]).at_index(2))
            .zip(self.3.decode(&items[3]).at_index(3))
            .zip(self.4.decode(&items[4]).at_index(4))
            .zip(self.5.decode(&items[5]).at_index(5))
            .map(|(((((a, b), c), d), e), f)| (a, b, c, d, e, f))
    }
}

/// Decodes an array of known length into a tuple of typed values.
///
/// Arity is checked before any element decodes: an array of the wrong
/// length fails with a single `WrongSizeList` and no positional attempts,
/// since slot alignment is undefined once the length is off. When the
/// length matches, every slot decodes and failures accumulate with their
/// indices.
pub struct TupleDecoder<T> {
    slots: T,
}

impl<T> TupleDecoder<T> {
    pub fn new(slots: T) -> Self {
        Self { slots }
    }
}

impl<T: TupleDecode> Decoder for TupleDecoder<T> {
    type Output = T::Output;

    fn decode(&self, value: &ConfigValue) -> DecodeResult<Self::Output> {
        let items = match value.as_array() {
            Some(items) => items,
            None => return wrong_type(value, &[ConfigValueType::Array]),
        };

        if items.len() != self.slots.arity() {
            return Validation::Failure(Failures::single(
                ConvertFailure::new(FailureReason::WrongSizeList {
                    expected: self.slots.arity(),
                    found: items.len(),
                })
                .with_origin(value.origin().cloned()),
            ));
        }

        self.slots.decode_items(items)
    }
}
