// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Reference algorithms.
//!
//! Each module supplies one divide-and-conquer algorithm as an
//! [`Algorithm`](crate::engine::Algorithm) plug-in, together with an input
//! type whose constructor rejects inputs outside the algorithm's domain.
//!
//! # Organization
//!
//! - `fibonacci`: naive recursive Fibonacci (memoisable)
//! - `merge_sort`, `quick_sort`: list sorting
//! - `binary_search`: index of a target in a sorted list
//! - `karatsuba`: integer multiplication
//! - `longest_common_subsequence`: LCS of two lists (memoisable)
//! - `test`: small plug-ins for exercising the engine itself

pub mod binary_search;
pub mod fibonacci;
pub mod karatsuba;
pub mod longest_common_subsequence;
pub mod merge_sort;
pub mod quick_sort;
pub mod test;

pub use binary_search::{BinarySearch, BinarySearchInput};
pub use fibonacci::{Fibonacci, FibonacciInput};
pub use karatsuba::{Karatsuba, KaratsubaInput};
pub use longest_common_subsequence::{LcsInput, LongestCommonSubsequence};
pub use merge_sort::{MergeSort, MergeSortInput};
pub use quick_sort::{QuickSort, QuickSortInput};
