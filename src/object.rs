use gl::types::GLuint;
use std::fmt;
use std::rc::Rc;

/// Release callback bound to a native object id.
pub type Deleter = Box<dyn FnOnce(GLuint)>;

/// Owns a single native GL object and releases it through its deleter.
///
/// An id of `0` is never owned; a wrapper holding it is empty. The boxed
/// deleter keeps the type `!Send`, so handles stay on the context thread.
#[derive(Default)]
pub struct GlObject {
    id: GLuint,
    deleter: Option<Deleter>,
}

/// A program handle shared between several owners on the context thread.
pub type SharedGlObject = Rc<GlObject>;

impl GlObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `id`, releasing whatever was held before.
    ///
    /// Returns `false` without touching the wrapper when `id` is `0`.
    pub fn init<F>(&mut self, id: GLuint, deleter: F) -> bool
    where
        F: FnOnce(GLuint) + 'static,
    {
        if id == 0 {
            return false;
        }

        self.reset();
        self.id = id;
        self.deleter = Some(Box::new(deleter));
        true
    }

    pub fn get(&self) -> GLuint {
        self.id
    }

    pub fn is_empty(&self) -> bool {
        self.id == 0
    }

    /// Gives up ownership without running the deleter.
    pub fn release(&mut self) -> GLuint {
        self.deleter = None;
        std::mem::take(&mut self.id)
    }

    /// Runs the deleter now and leaves the wrapper empty.
    pub fn reset(&mut self) {
        let id = std::mem::take(&mut self.id);
        if let Some(deleter) = self.deleter.take() {
            deleter(id);
        }
    }

    pub fn into_shared(self) -> SharedGlObject {
        Rc::new(self)
    }
}

impl Drop for GlObject {
    fn drop(&mut self) {
        self.reset();
    }
}

impl fmt::Debug for GlObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlObject")
            .field("id", &self.id)
            .field("owned", &self.deleter.is_some())
            .finish()
    }
}
