//! Method chain builder for validator expressions.

/// A method call in a chain.
#[derive(Debug, Clone)]
struct Call {
    method: String,
    args: Vec<String>,
}

/// Builder for `z.string().min(1).optional()` style chains.
#[derive(Debug, Clone)]
pub struct MethodChain {
    base: String,
    /// `None` when the base is a bare expression rather than a call.
    base_args: Option<Vec<String>>,
    calls: Vec<Call>,
}

impl MethodChain {
    /// Create a new method chain starting with a function call.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            base_args: Some(Vec::new()),
            calls: Vec::new(),
        }
    }

    /// Create a chain on an existing expression, e.g. an identifier.
    pub fn on(expr: impl Into<String>) -> Self {
        Self {
            base: expr.into(),
            base_args: None,
            calls: Vec::new(),
        }
    }

    /// Add an argument to the base function call.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.base_args.get_or_insert_with(Vec::new).push(arg.into());
        self
    }

    /// Add an optional argument to the base function call.
    pub fn arg_opt(self, arg: Option<impl Into<String>>) -> Self {
        match arg {
            Some(a) => self.arg(a),
            None => self,
        }
    }

    /// Add a method call to the chain.
    pub fn call(mut self, method: impl Into<String>, arg: impl Into<String>) -> Self {
        self.calls.push(Call {
            method: method.into(),
            args: vec![arg.into()],
        });
        self
    }

    /// Add a method call with multiple arguments.
    pub fn call_args(mut self, method: impl Into<String>, args: Vec<String>) -> Self {
        self.calls.push(Call {
            method: method.into(),
            args,
        });
        self
    }

    /// Add a method call with no arguments.
    pub fn call_empty(mut self, method: impl Into<String>) -> Self {
        self.calls.push(Call {
            method: method.into(),
            args: Vec::new(),
        });
        self
    }

    /// Conditionally add a method call using an Option.
    pub fn call_opt(self, method: impl Into<String>, arg: Option<impl Into<String>>) -> Self {
        match arg {
            Some(a) => self.call(method, a),
            None => self,
        }
    }

    /// Build the chain as a single-line string.
    pub fn build(&self) -> String {
        let mut result = match &self.base_args {
            Some(args) => format!("{}({})", self.base, args.join(", ")),
            None => self.base.clone(),
        };

        for call in &self.calls {
            result.push_str(&format!(".{}({})", call.method, call.args.join(", ")));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_chain() {
        let chain = MethodChain::new("z.string")
            .call("min", "1")
            .call_empty("optional")
            .build();
        assert_eq!(chain, "z.string().min(1).optional()");
    }

    #[test]
    fn test_chain_with_multiple_args() {
        let chain = MethodChain::new("z.record")
            .arg("z.string()")
            .arg("z.any()")
            .build();
        assert_eq!(chain, "z.record(z.string(), z.any())");
    }

    #[test]
    fn test_chain_on_expression() {
        let chain = MethodChain::on("user.Address").call_empty("nullable");
        assert_eq!(chain.build(), "user.Address.nullable()");
        assert_eq!(MethodChain::on("user").build(), "user");
    }

    #[test]
    fn test_call_opt() {
        let none: Option<&str> = None;
        let chain = MethodChain::new("z.string")
            .call_opt("describe", Some("\"name\""))
            .call_opt("brand", none)
            .build();
        assert_eq!(chain, "z.string().describe(\"name\")");
    }

    #[test]
    fn test_arg_opt() {
        let chain = MethodChain::new("z.email")
            .arg_opt(Some("{ error: \"bad\" }"))
            .build();
        assert_eq!(chain, "z.email({ error: \"bad\" })");
    }

    #[test]
    fn test_call_args() {
        let chain = MethodChain::new("z.any")
            .call_args("refine", vec!["(value) => true".into(), "\"msg\"".into()])
            .build();
        assert_eq!(chain, "z.any().refine((value) => true, \"msg\")");
    }
}
