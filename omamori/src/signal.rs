#[cfg(target_family = "unix")]
use tokio::signal::unix::SignalKind;

/// Resolves once the process receives a shutdown signal
///
/// Listens for Ctrl-C everywhere, plus SIGTERM and SIGQUIT on Unix.
pub async fn shutdown() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(target_family = "unix")]
    let second_signal = async {
        let mut terminate = tokio::signal::unix::signal(SignalKind::terminate()).unwrap();
        let mut quit = tokio::signal::unix::signal(SignalKind::quit()).unwrap();

        tokio::select! {
            _ = terminate.recv() => (),
            _ = quit.recv() => (),
        }
    };
    #[cfg(not(target_family = "unix"))]
    let second_signal = std::future::pending();

    tokio::select! {
        _ = ctrl_c => (),
        () = second_signal => (),
    }
}
