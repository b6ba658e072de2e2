/// An ephemeral named filesystem attached to sandbox executions (spec §2,
/// §4.1). `Volume` itself is an inert handle; all lifecycle operations
/// (create/remove/clone/copy) live on [`crate::Sandbox`] since they require
/// talking to the container runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Volume {
    name: String,
}

impl Volume {
    /// Wrap an already-existing runtime volume name.
    pub fn named(name: impl Into<String>) -> Volume {
        Volume { name: name.into() }
    }

    /// The runtime-level name, e.g. as passed to a container's `--volume`.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_the_given_name() {
        let v = Volume::named("judge-volume-abc");
        assert_eq!(v.name(), "judge-volume-abc");
    }
}
