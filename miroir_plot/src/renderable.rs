use std::{rc::Rc, sync::Arc};

use either::Either;

use super::*;

/// A wrapper around a `Vec<T>` that only allows pushing and extending.
#[derive(Clone, Debug, PartialEq)]
pub struct List<T>(pub(crate) Vec<T>);

impl<T> Default for List<T> {
    #[inline]
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> List<T> {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[inline]
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }

    #[inline]
    pub fn push(&mut self, v: T) {
        self.0.push(v);
    }
}

impl<T> Extend<T> for List<T> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

/// Things that can be drawn as reflector segments.
///
/// Implemented for [`Reflector`]s and the usual containers of them, including tuples,
/// so that groups of reflectors of different types can be rendered together.
#[impl_trait_for_tuples::impl_for_tuples(16)]
pub trait Plottable {
    /// Pushes the `[start, end]` points of every segment of `self` onto `list`, in order.
    fn append_segments(&self, list: &mut List<[Point; 2]>);
}

impl<S: Scalar + AsPrimitive<f64>> Plottable for Reflector<S> {
    #[inline]
    fn append_segments(&self, list: &mut List<[Point; 2]>) {
        list.push([to_point(self.start()), to_point(self.end())]);
    }
}

impl<L: Plottable, R: Plottable> Plottable for Either<L, R> {
    #[inline]
    fn append_segments(&self, list: &mut List<[Point; 2]>) {
        match self {
            Either::Left(l) => l.append_segments(list),
            Either::Right(r) => r.append_segments(list),
        }
    }
}

impl<T: Plottable> Plottable for [T] {
    fn append_segments(&self, list: &mut List<[Point; 2]>) {
        self.iter().for_each(|a| a.append_segments(list));
    }
}

impl<const N: usize, T: Plottable> Plottable for [T; N] {
    #[inline]
    fn append_segments(&self, list: &mut List<[Point; 2]>) {
        self.as_slice().append_segments(list);
    }
}

// It's clear that all these impls use the `Deref` trait, but writing a blanket impl over all
// types implementing `Deref` makes the trait unusable downstream

impl<T: Plottable> Plottable for Vec<T> {
    #[inline]
    fn append_segments(&self, list: &mut List<[Point; 2]>) {
        self.as_slice().append_segments(list);
    }
}

impl<T: Plottable + ?Sized> Plottable for Box<T> {
    #[inline]
    fn append_segments(&self, list: &mut List<[Point; 2]>) {
        self.as_ref().append_segments(list);
    }
}

impl<T: Plottable + ?Sized> Plottable for Arc<T> {
    #[inline]
    fn append_segments(&self, list: &mut List<[Point; 2]>) {
        self.as_ref().append_segments(list);
    }
}

impl<T: Plottable + ?Sized> Plottable for Rc<T> {
    #[inline]
    fn append_segments(&self, list: &mut List<[Point; 2]>) {
        self.as_ref().append_segments(list);
    }
}

impl<T: Plottable + ?Sized> Plottable for &T {
    #[inline]
    fn append_segments(&self, list: &mut List<[Point; 2]>) {
        (*self).append_segments(list);
    }
}

impl<T: Plottable + ?Sized> Plottable for &mut T {
    #[inline]
    fn append_segments(&self, list: &mut List<[Point; 2]>) {
        (*self as &T).append_segments(list);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collect(p: &(impl Plottable + ?Sized)) -> Vec<[Point; 2]> {
        let mut list = List::new();
        p.append_segments(&mut list);
        list.into_inner()
    }

    #[test]
    fn reflector_converts_to_f64() {
        let r = Reflector::new([1f32, 2.], [3., 4.5]);
        assert_eq!(
            collect(&r),
            vec![[Point::new(1., 2.), Point::new(3., 4.5)]]
        );
    }

    #[test]
    fn mixed_groups_keep_order() {
        let walls = [
            Reflector::new([0., 0.], [0., 10.]),
            Reflector::new([0., 10.], [10., 10.]),
        ];
        let mirror = Box::new(Reflector::new([5i32, 5], [6, 6]));
        let either: Either<Reflector, Vec<Reflector>> = Either::Right(vec![]);

        let segments = collect(&(&walls, mirror, either));

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0][0], Point::new(0., 0.));
        assert_eq!(segments[2][1], Point::new(6., 6.));
    }

    #[test]
    fn list_keeps_push_order() {
        let mut list = List::new();
        list.push(1);
        list.extend([2, 3]);
        list.push(4);
        assert_eq!(list.into_inner(), vec![1, 2, 3, 4]);
    }
}
