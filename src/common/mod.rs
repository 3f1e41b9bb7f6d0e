pub mod io;

/// Reset SIGPIPE to default behavior (SIG_DFL). Rust sets SIGPIPE to
/// SIG_IGN by default, but a report pipeline (`recsort data.txt | head`)
/// should die quietly like any classic Unix filter. Called at the start
/// of main().
#[inline]
pub fn reset_sigpipe() {
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}
