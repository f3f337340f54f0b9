use std::cmp::Ordering;

use num::Float;
use serde::{Deserialize, Serialize};

/// Sparse vector holding only non-zero entries.
/// `indices` are kept strictly ascending and aligned with `values`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SparseVector<N = f32>
where
    N: Float,
{
    indices: Vec<u32>,
    values: Vec<N>,
}

impl<N> SparseVector<N>
where
    N: Float,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build from unordered (index, value) pairs.
    /// Duplicate indices are summed and zeros are dropped.
    pub fn from_pairs(mut pairs: Vec<(u32, N)>) -> Self {
        pairs.sort_unstable_by_key(|(idx, _)| *idx);
        let mut indices: Vec<u32> = Vec::with_capacity(pairs.len());
        let mut values: Vec<N> = Vec::with_capacity(pairs.len());
        for (idx, val) in pairs {
            match indices.last() {
                Some(&last) if last == idx => {
                    if let Some(v) = values.last_mut() {
                        *v = *v + val;
                    }
                }
                _ => {
                    indices.push(idx);
                    values.push(val);
                }
            }
        }
        let mut vec = Self { indices, values };
        vec.drop_zeros();
        vec
    }

    fn drop_zeros(&mut self) {
        if self.values.iter().all(|v| !v.is_zero()) {
            return;
        }
        let (indices, values): (Vec<u32>, Vec<N>) = self
            .indices
            .iter()
            .copied()
            .zip(self.values.iter().copied())
            .filter(|(_, v)| !v.is_zero())
            .unzip();
        self.indices = indices;
        self.values = values;
    }

    /// number of non-zero entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Value at `index`, zero when absent
    pub fn get(&self, index: u32) -> N {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => N::zero(),
        }
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (u32, N)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn values(&self) -> &[N] {
        &self.values
    }

    /// Dot product by merging both index lists.
    /// Accumulates in f64.
    pub fn dot(&self, other: &Self) -> f64
    where
        N: Into<f64>,
    {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0_f64;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                Ordering::Equal => {
                    let a: f64 = self.values[i].into();
                    let b: f64 = other.values[j].into();
                    sum += a * b;
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        sum
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64
    where
        N: Into<f64>,
    {
        self.values
            .iter()
            .map(|v| {
                let v: f64 = (*v).into();
                v * v
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Scale to unit length; an all-zero vector is left untouched
    pub fn l2_normalize(&mut self)
    where
        N: Into<f64>,
    {
        let norm = self.norm();
        if norm == 0.0 || !norm.is_finite() {
            return;
        }
        let Some(inv) = N::from(1.0 / norm) else {
            return;
        };
        for v in &mut self.values {
            *v = *v * inv;
        }
    }
}
