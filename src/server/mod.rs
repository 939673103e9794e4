mod http;

pub use http::{router, KernelServer, SharedKernel, IO_TIMEOUT, MAX_BODY_BYTES};
