// Matrix data structures and format conversions

pub mod conversion;
pub mod csr;
pub mod ellpackr;
pub mod generator;
pub mod reference;

pub use conversion::{padded_row_count, PaddedCsr};
pub use csr::SparseMatrixCSR;
pub use ellpackr::{linear_index, EllpackrMatrix};
pub use generator::{constant_vector, MatrixGenerator};
pub use reference::reference_spmv;
