/// PulseAudio connection implementing the watcher's server seam
pub mod pulse;
