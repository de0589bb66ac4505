use knuffel::errors::DecodeError;

/// A tab of the default skeleton used when a screen switches into tabbed layout.
#[derive(knuffel::Decode, Debug, Clone, PartialEq)]
pub struct TabConfig {
    #[knuffel(argument)]
    pub name: TabName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabName(pub String);

impl<S: knuffel::traits::ErrorSpan> knuffel::DecodeScalar<S> for TabName {
    fn type_check(
        type_name: &Option<knuffel::span::Spanned<knuffel::ast::TypeName, S>>,
        ctx: &mut knuffel::decode::Context<S>,
    ) {
        if let Some(type_name) = &type_name {
            ctx.emit_error(DecodeError::unexpected(
                type_name,
                "type name",
                "no type name expected for this node",
            ));
        }
    }

    fn raw_decode(
        val: &knuffel::span::Spanned<knuffel::ast::Literal, S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<TabName, DecodeError<S>> {
        #[derive(Debug)]
        struct TabNameSet(Vec<String>);
        match &**val {
            knuffel::ast::Literal::String(ref s) => {
                if s.trim().is_empty() {
                    ctx.emit_error(DecodeError::conversion(val, "tab names must not be empty"));
                    return Ok(Self(String::new()));
                }

                let mut name_set: Vec<String> = match ctx.get::<TabNameSet>() {
                    Some(h) => h.0.clone(),
                    None => Vec::new(),
                };

                if name_set.iter().any(|name| name.eq_ignore_ascii_case(s)) {
                    ctx.emit_error(DecodeError::unexpected(
                        val,
                        "named tab",
                        format!("duplicate named tab: {s}"),
                    ));
                    return Ok(Self(String::new()));
                }

                name_set.push(s.to_string());
                ctx.set(TabNameSet(name_set));
                Ok(Self(s.clone().into()))
            }
            _ => {
                ctx.emit_error(DecodeError::unsupported(val, "tab names must be strings"));
                Ok(Self(String::new()))
            }
        }
    }
}
