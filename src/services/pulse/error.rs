/// PulseAudio connection and protocol errors
#[derive(thiserror::Error, Debug)]
pub enum PulseError {
    /// Context could not be created
    #[error("pa_context_new() failed")]
    ContextCreation,

    /// Connection could not be established or was lost
    #[error("Connection failure: {0}")]
    ConnectionFailed(String),

    /// Server refused the sink event subscription
    #[error("Server rejected sink event subscription")]
    SubscriptionRejected,

    /// Mainloop quit with a failure status
    #[error("PulseAudio mainloop quit with status {0}")]
    LoopQuit(i32),
}
