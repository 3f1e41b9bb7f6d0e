/// Use mimalloc as the global allocator.
/// 2-3x faster than glibc malloc for small allocations — record parsing
/// and key rendering allocate many short strings.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod common;
pub mod record;
pub mod report;
pub mod sort;
