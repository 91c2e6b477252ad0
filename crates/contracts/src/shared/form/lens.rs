/// Typed key into a state tree.
///
/// Replaces string-addressed `name` props: a lens knows how to reach one
/// field of `S`, and `set`/`update` return a new tree instead of mutating
/// the one that was passed in.
pub struct Lens<S, T> {
    get: fn(&S) -> &T,
    get_mut: fn(&mut S) -> &mut T,
}

impl<S, T> Clone for Lens<S, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, T> Copy for Lens<S, T> {}

impl<S, T> Lens<S, T> {
    pub fn new(get: fn(&S) -> &T, get_mut: fn(&mut S) -> &mut T) -> Self {
        Self { get, get_mut }
    }

    pub fn get<'a>(&self, state: &'a S) -> &'a T {
        (self.get)(state)
    }

    pub fn get_mut<'a>(&self, state: &'a mut S) -> &'a mut T {
        (self.get_mut)(state)
    }

    /// Copy of `state` with the focused field replaced
    pub fn set(&self, state: &S, value: T) -> S
    where
        S: Clone,
    {
        let mut next = state.clone();
        *(self.get_mut)(&mut next) = value;
        next
    }

    /// Copy of `state` with `f` applied to the focused field
    pub fn update(&self, state: &S, f: impl FnOnce(&mut T)) -> S
    where
        S: Clone,
    {
        let mut next = state.clone();
        f((self.get_mut)(&mut next));
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Form {
        title: String,
        count: i32,
    }

    fn title() -> Lens<Form, String> {
        Lens::new(|f: &Form| &f.title, |f: &mut Form| &mut f.title)
    }

    #[test]
    fn test_set_returns_new_tree() {
        let form = Form { title: "a".into(), count: 1 };
        let next = title().set(&form, "b".into());
        assert_eq!(form.title, "a");
        assert_eq!(next.title, "b");
        assert_eq!(next.count, 1);
    }

    #[test]
    fn test_update() {
        let form = Form { title: "a".into(), count: 1 };
        let next = title().update(&form, |t| t.push('!'));
        assert_eq!(title().get(&next), "a!");
    }
}
