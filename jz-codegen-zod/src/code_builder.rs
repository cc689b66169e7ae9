//! Line-oriented text builder for generated modules.

/// Something that can write itself into a [`CodeBuilder`].
pub trait Renderable {
    fn render(&self, builder: CodeBuilder) -> CodeBuilder;

    /// Render into a fresh builder.
    fn build(&self) -> String {
        self.render(CodeBuilder::new()).build()
    }
}

/// Fluent API for building module text.
///
/// Supports consuming methods (returning `Self`) for chaining and mutable
/// methods (prefixed `push_`) for loops.
///
/// Validator expressions arrive already indented relative to their first
/// line, so multi-line text is written verbatim.
///
/// # Example
///
/// ```
/// use jsonzod_codegen_zod::CodeBuilder;
///
/// let code = CodeBuilder::new()
///     .line("import * as z from \"zod/v4\";")
///     .blank()
///     .lines("export const point = z.object({\n  x: z.number()\n});")
///     .build();
///
/// assert_eq!(
///     code,
///     "import * as z from \"zod/v4\";\n\nexport const point = z.object({\n  x: z.number()\n});\n"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    buffer: String,
}

impl CodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line (mutable).
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add every line of `s` (mutable).
    pub fn push_lines(&mut self, s: &str) -> &mut Self {
        for line in s.lines() {
            self.push_line(line);
        }
        self
    }

    /// Add a blank line (mutable).
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Render a node in place (mutable).
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        let builder = std::mem::take(self);
        *self = node.render(builder);
        self
    }

    /// Add a line.
    pub fn line(mut self, s: &str) -> Self {
        self.push_line(s);
        self
    }

    /// Add every line of `s`.
    pub fn lines(mut self, s: &str) -> Self {
        self.push_lines(s);
        self
    }

    /// Add a blank line.
    pub fn blank(mut self) -> Self {
        self.push_blank();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn build(self) -> String {
        self.buffer
    }
}
