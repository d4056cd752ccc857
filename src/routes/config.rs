//! Route configuration types.

use axum::http::Method;

use super::schema::BodySchema;

/// Configuration of one HTTP method on a route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodConfig {
    /// Declared body fields, if the method takes a body.
    pub body: Option<BodySchema>,
}

impl MethodConfig {
    /// A method without a body.
    pub fn without_body() -> Self {
        Self { body: None }
    }

    /// A method whose body is validated against `schema`.
    pub fn with_body(schema: BodySchema) -> Self {
        Self { body: Some(schema) }
    }
}

/// Declarative mapping from HTTP method to validation config for a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    path: &'static str,
    methods: Vec<(Method, MethodConfig)>,
}

impl RouteConfig {
    /// Empty configuration for `path`.
    pub fn new(path: &'static str) -> Self {
        Self {
            path,
            methods: Vec::new(),
        }
    }

    /// Declare a method. A later declaration of the same method replaces the
    /// earlier one.
    pub fn method(mut self, method: Method, config: MethodConfig) -> Self {
        self.methods.retain(|(m, _)| *m != method);
        self.methods.push((method, config));
        self
    }

    /// The configured path.
    pub fn path(&self) -> &'static str {
        self.path
    }

    fn get(&self, method: &Method) -> Option<&MethodConfig> {
        self.methods
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, config)| config)
    }

    /// Body schema for `method`, if it declares one.
    pub fn body_schema(&self, method: &Method) -> Option<&BodySchema> {
        self.get(method).and_then(|config| config.body.as_ref())
    }

    /// Declared methods, in declaration order. The router serves exactly
    /// these on [`RouteConfig::path`].
    pub fn allowed_methods(&self) -> Vec<Method> {
        self.methods.iter().map(|(m, _)| m.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redeclaring_a_method_replaces_it() {
        let route = RouteConfig::new("/things")
            .method(Method::POST, MethodConfig::without_body())
            .method(Method::POST, MethodConfig::with_body(BodySchema::new()));

        assert_eq!(route.allowed_methods(), vec![Method::POST]);
        assert!(route.body_schema(&Method::POST).is_some());
        assert!(route.get(&Method::GET).is_none());
        assert_eq!(route.path(), "/things");
    }
}
