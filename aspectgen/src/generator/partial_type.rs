//! Partial type wrapper.
//!
//! Layout of every generated file:
//!
//! ```text
//! // <auto-generated/>
//! using System.ComponentModel;
//!
//! namespace App
//! {
//!   public partial class Point : INotifyPropertyChanged
//!   {
//!     ...body...
//!   }
//! }
//! ```
//!
//! Types in the global namespace skip the namespace block.

use crate::ir::TypeDescriptor;

use super::traits::GeneratorConfig;

/// Output path for a generator's file: `.` separates directories and
/// generic brackets become square brackets.
pub fn generated_file_name(ty: &TypeDescriptor, generator: &str) -> String {
    let path: String = ty
        .full_name
        .chars()
        .map(|c| match c {
            '<' => '[',
            '>' => ']',
            '.' => '/',
            other => other,
        })
        .collect();
    format!("{}-{}.g.cs", path, generator)
}

/// Renders the partial declaration around a generated body.
#[derive(Debug, Clone)]
pub struct PartialType<'a> {
    ty: &'a TypeDescriptor,
    config: &'a GeneratorConfig,
    dependencies: Vec<String>,
    interfaces: Vec<String>,
}

impl<'a> PartialType<'a> {
    pub fn new(ty: &'a TypeDescriptor, config: &'a GeneratorConfig) -> Self {
        Self {
            ty,
            config,
            dependencies: Vec::new(),
            interfaces: Vec::new(),
        }
    }

    pub fn with_dependencies(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_interfaces(mut self, interfaces: Vec<String>) -> Self {
        self.interfaces = interfaces;
        self
    }

    /// Render the file. `body` uses `\n` line breaks and depth-0 indentation;
    /// the configured line ending is applied to the whole file at the end.
    pub fn render(&self, body: &str) -> String {
        let indent = self.config.indent;
        let mut lines: Vec<String> = vec!["// <auto-generated/>".to_string()];

        for dependency in &self.dependencies {
            lines.push(dependency.clone());
        }
        lines.push(String::new());

        let depth = match &self.ty.namespace {
            Some(namespace) => {
                lines.push(format!("namespace {}", namespace));
                lines.push("{".to_string());
                1
            }
            None => 0,
        };

        let mut head = format!("{}{}", indent.indent(depth), self.ty.declaration_text());
        if !self.interfaces.is_empty() {
            head.push_str(" : ");
            head.push_str(&self.interfaces.join(", "));
        }
        lines.push(head);
        lines.push(format!("{}{{", indent.indent(depth)));

        for line in body.lines() {
            if line.is_empty() {
                lines.push(String::new());
            } else {
                lines.push(format!("{}{}", indent.indent(depth + 1), line));
            }
        }

        lines.push(format!("{}}}", indent.indent(depth)));
        if depth > 0 {
            lines.push("}".to_string());
        }

        let mut code = lines.join("\n");
        code.push('\n');

        match self.config.line_ending_str() {
            "\n" => code,
            ending => code.replace('\n', ending),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::LineEnding;

    #[test]
    fn test_file_name() {
        let ty = TypeDescriptor::new("Box<T>", Some("App.Model"));
        assert_eq!(
            generated_file_name(&ty, "Equals"),
            "App/Model/Box[T]-Equals.g.cs"
        );

        let global = TypeDescriptor::new("Point", None);
        assert_eq!(generated_file_name(&global, "ToString"), "Point-ToString.g.cs");
    }

    #[test]
    fn test_render_with_namespace() {
        let ty = TypeDescriptor::new("Point", Some("App"));
        let config = GeneratorConfig::default();
        let code = PartialType::new(&ty, &config)
            .with_dependencies(vec!["using System.ComponentModel;".to_string()])
            .with_interfaces(vec!["INotifyPropertyChanged".to_string()])
            .render("int A;\n\nint B;");

        assert_eq!(
            code,
            "// <auto-generated/>\n\
             using System.ComponentModel;\n\
             \n\
             namespace App\n\
             {\n\
             \x20 public partial class Point : INotifyPropertyChanged\n\
             \x20 {\n\
             \x20   int A;\n\
             \n\
             \x20   int B;\n\
             \x20 }\n\
             }\n"
        );
    }

    #[test]
    fn test_render_global_namespace_crlf() {
        let ty = TypeDescriptor::new("Point", None);
        let config = GeneratorConfig::default().with_line_ending(LineEnding::CrLf);
        let code = PartialType::new(&ty, &config).render("int A;");

        assert_eq!(
            code,
            "// <auto-generated/>\r\n\r\npublic partial class Point\r\n{\r\n  int A;\r\n}\r\n"
        );
    }
}
