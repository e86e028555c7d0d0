use std::collections::HashMap;

use tracing::debug;

/// Bijective map between type identities and definition names.
///
/// Once an identity owns a name it keeps it for the registry's lifetime,
/// and no two identities ever share one.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    owners: HashMap<String, String>,
    names: HashMap<String, String>,
    qualify: bool,
}

impl NameRegistry {
    pub fn new(qualify: bool) -> Self {
        Self {
            qualify,
            ..Self::default()
        }
    }

    /// Name owned by `identity`, claiming one if it has none yet.
    ///
    /// Candidates are tried in order: `requested`, then (when qualification is
    /// on) the namespace-qualified form, then `{requested}Type{n}` for n >= 2.
    pub fn allocate(&mut self, identity: &str, requested: &str, namespace: &str) -> String {
        if let Some(name) = self.names.get(identity) {
            return name.clone();
        }

        let mut candidates = vec![requested.to_string()];
        if self.qualify {
            if let Some(prefix) = qualifier(namespace) {
                candidates.push(format!("{prefix}{requested}"));
            }
        }

        let name = candidates
            .into_iter()
            .find(|c| !self.owners.contains_key(c))
            .unwrap_or_else(|| {
                (2..)
                    .map(|n| format!("{requested}Type{n}"))
                    .find(|c| !self.owners.contains_key(c))
                    .unwrap_or_default()
            });

        if name != requested {
            debug!(identity, requested, name = %name, "Definition name collision, renamed");
        }
        self.owners.insert(name.clone(), identity.to_string());
        self.names.insert(identity.to_string(), name.clone());
        name
    }

    pub fn name_of(&self, identity: &str) -> Option<&str> {
        self.names.get(identity).map(String::as_str)
    }

    pub fn owner_of(&self, name: &str) -> Option<&str> {
        self.owners.get(name).map(String::as_str)
    }

    /// Release the name held by `identity`.
    pub fn release(&mut self, identity: &str) {
        if let Some(name) = self.names.remove(identity) {
            self.owners.remove(&name);
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn clear(&mut self) {
        self.owners.clear();
        self.names.clear();
    }
}

/// PascalCase form of the last namespace segment (`app::other_pkg` -> `OtherPkg`).
fn qualifier(namespace: &str) -> Option<String> {
    let segment = namespace.rsplit("::").next()?.trim();
    let pascal: String = segment
        .split(['_', '-', '.'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();
    if pascal.is_empty() {
        None
    } else {
        Some(pascal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualifier_forms() {
        assert_eq!(qualifier("app::other_pkg").as_deref(), Some("OtherPkg"));
        assert_eq!(qualifier("models").as_deref(), Some("Models"));
        assert_eq!(qualifier(""), None);
    }

    #[test]
    fn release_frees_the_name() {
        let mut names = NameRegistry::new(false);
        assert_eq!(names.allocate("a::User", "User", "a"), "User");
        names.release("a::User");
        assert_eq!(names.allocate("b::User", "User", "b"), "User");
        assert_eq!(names.owner_of("User"), Some("b::User"));
    }
}
