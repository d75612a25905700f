//! Waiting on hardware handshakes
//!
//! Enabling HSE or the PLL is followed by a wait for the matching ready
//! flag. [`Spin`] waits for as long as it takes, which is what the
//! hardware guarantees at these clock domains: if the flag never sets,
//! it never returns. [`Bounded`] gives up after a fixed number of
//! attempts instead, for host-side testing or for firmware that would
//! rather fall back than hang.

/// The ready flag was not observed within the allowed attempts
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimedOut;

/// Strategy for waiting until a status flag is set
pub trait Poll {
    /// Call `ready` until it returns `true`
    fn wait_until<F>(&mut self, ready: F) -> Result<(), TimedOut>
    where
        F: FnMut() -> bool;
}

/// Busy-wait with no timeout
#[derive(Debug, Default, Copy, Clone)]
pub struct Spin;

impl Poll for Spin {
    fn wait_until<F>(&mut self, mut ready: F) -> Result<(), TimedOut>
    where
        F: FnMut() -> bool,
    {
        while !ready() {}
        Ok(())
    }
}

/// Busy-wait for at most `attempts` reads of the status flag
#[derive(Debug, Copy, Clone)]
pub struct Bounded {
    attempts: u32,
}

impl Bounded {
    /// A poller that checks the flag at most `attempts` times
    pub const fn new(attempts: u32) -> Self {
        Self { attempts }
    }
}

impl Poll for Bounded {
    fn wait_until<F>(&mut self, mut ready: F) -> Result<(), TimedOut>
    where
        F: FnMut() -> bool,
    {
        for _ in 0..self.attempts {
            if ready() {
                return Ok(());
            }
        }
        Err(TimedOut)
    }
}
