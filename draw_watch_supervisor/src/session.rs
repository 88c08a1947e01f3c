use crate::adapter::FeedSession;

/// Owns at most one live session and releases it exactly once.
///
/// Dropping the guard releases whatever it still holds, so interrupt and
/// error paths cannot leak a session.
#[derive(Debug)]
pub struct SessionGuard<S: FeedSession> {
    live: Option<S>,
}

impl<S: FeedSession> SessionGuard<S> {
    pub fn empty() -> Self {
        Self { live: None }
    }

    /// Install a new session, releasing the previous one first.
    pub fn replace(&mut self, session: S) {
        self.release();
        self.live = Some(session);
    }

    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut S> {
        self.live.as_mut()
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    /// Release the held session, if any. Safe to call repeatedly.
    pub fn release(&mut self) {
        if let Some(mut session) = self.live.take() {
            session.release();
        }
    }
}

impl<S: FeedSession> Default for SessionGuard<S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: FeedSession> Drop for SessionGuard<S> {
    fn drop(&mut self) {
        self.release();
    }
}
