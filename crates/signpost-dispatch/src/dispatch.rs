//! Dispatch logic.
//!
//! One pass over the route table, in registration order:
//!
//! 1. always-run routes fire with no value;
//! 2. stdin routes fire with no value and access to their open stream;
//! 3. option routes fire once per matching occurrence in the arguments
//!    (see [`occurrences`]), receiving the parsed value.
//!
//! Routes that answer to the same flag all fire, each with the same value.
//! The first handler error ends the pass.

use crate::error::HandlerFailure;
use crate::handler::RouteContext;
use crate::matcher::occurrences;
use crate::route::{Route, RouteKind, RouteTable};

/// Runs routes against an argument vector.
#[derive(Debug, Default)]
pub struct Dispatcher {
    current: Option<usize>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the route being processed.
    ///
    /// Only set while a dispatch pass is running; `None` otherwise.
    pub fn current_route(&self) -> Option<usize> {
        self.current
    }

    /// Dispatches `args` (without the program name) over `table`.
    ///
    /// Returns `Ok(true)` if at least one handler ran, `Ok(false)` if none
    /// matched, and the failure of the first handler that returned an error.
    pub fn dispatch<S>(
        &mut self,
        table: &mut RouteTable<S>,
        args: &[String],
        usage: &str,
        app_state: &mut S,
    ) -> Result<bool, HandlerFailure> {
        let result = self.run_routes(table, args, usage, app_state);
        self.current = None;
        result
    }

    fn run_routes<S>(
        &mut self,
        table: &mut RouteTable<S>,
        args: &[String],
        usage: &str,
        app_state: &mut S,
    ) -> Result<bool, HandlerFailure> {
        let mut fired = 0usize;

        for (index, route) in table.routes.iter_mut().enumerate() {
            self.current = Some(index);
            let Route {
                spec,
                handler,
                stdin,
            } = route;

            let values = match spec.kind() {
                RouteKind::AlwaysRun | RouteKind::StdinStream => vec![None],
                RouteKind::Option(long) => occurrences(long, spec.short(), args),
            };

            for value in &values {
                tracing::debug!(route = %spec.label(), value = ?value, "dispatching");
                let mut ctx = RouteContext::new(
                    spec,
                    value.as_deref(),
                    usage,
                    stdin.as_mut(),
                    &mut *app_state,
                );
                handler
                    .handle(&mut ctx)
                    .map_err(|error| HandlerFailure::new(spec.label(), error))?;
                fired += 1;
            }
        }

        tracing::debug!(fired, routes = table.len(), "dispatch finished");
        Ok(fired > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::FnHandler;
    use crate::route::OptionToken;
    use signpost_input::{MockStdin, StdinLines};

    type Calls = Vec<(String, Option<String>)>;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn recorder(
        tag: &'static str,
    ) -> FnHandler<impl FnMut(&mut RouteContext<'_, Calls>) -> anyhow::Result<()>, Calls> {
        FnHandler::new(move |ctx: &mut RouteContext<'_, Calls>| {
            let value = ctx.value().map(str::to_string);
            ctx.app_state_mut().push((tag.to_string(), value));
            Ok(())
        })
    }

    fn option(token: &str) -> OptionToken {
        OptionToken::parse(token).unwrap()
    }

    fn run(table: &mut RouteTable<Calls>, argv: &[&str]) -> (Result<bool, HandlerFailure>, Calls) {
        let mut calls = Calls::new();
        let result = Dispatcher::new().dispatch(table, &args(argv), "", &mut calls);
        (result, calls)
    }

    #[test]
    fn test_long_option_with_value() {
        let mut table = RouteTable::new();
        table.push(Route::option(option("hello-world:"), recorder("a")));

        let (result, calls) = run(&mut table, &["--hello-world", "Bob"]);

        assert!(result.unwrap());
        assert_eq!(calls, vec![("a".to_string(), Some("Bob".to_string()))]);
    }

    #[test]
    fn test_option_and_always_run_fire_in_table_order() {
        let mut table = RouteTable::new();
        table.push(Route::option(option("hello-world:"), recorder("a")));
        table.push(Route::always(recorder("b")));

        let (result, calls) = run(&mut table, &["--hello-world=Alice"]);

        assert!(result.unwrap());
        assert_eq!(
            calls,
            vec![
                ("a".to_string(), Some("Alice".to_string())),
                ("b".to_string(), None)
            ]
        );
    }

    #[test]
    fn test_always_run_routes_fire_once_each() {
        let mut table = RouteTable::new();
        table.push(Route::always(recorder("first")));
        table.push(Route::always(recorder("second")));

        for argv in [&[][..], &["--unknown"][..], &["x", "y", "-z"][..]] {
            let (result, calls) = run(&mut table, argv);
            assert!(result.unwrap());
            assert_eq!(
                calls,
                vec![("first".to_string(), None), ("second".to_string(), None)]
            );
        }
    }

    #[test]
    fn test_nothing_matches() {
        let mut table = RouteTable::new();
        table.push(Route::option(option("help"), recorder("help")));

        let (result, calls) = run(&mut table, &[]);

        assert!(!result.unwrap());
        assert!(calls.is_empty());
    }

    #[test]
    fn test_empty_table() {
        let mut table = RouteTable::new();
        let (result, calls) = run(&mut table, &["--anything"]);
        assert!(!result.unwrap());
        assert!(calls.is_empty());
    }

    #[test]
    fn test_duplicate_routes_all_fire_with_same_value() {
        let mut table = RouteTable::new();
        table.push(Route::option(option("name:"), recorder("narrow")));
        table.push(Route::option(option("name:"), recorder("catch-all")));

        let (_, calls) = run(&mut table, &["--name", "Zoe"]);

        assert_eq!(
            calls,
            vec![
                ("narrow".to_string(), Some("Zoe".to_string())),
                ("catch-all".to_string(), Some("Zoe".to_string()))
            ]
        );
    }

    #[test]
    fn test_short_and_long_occurrences_each_fire() {
        let mut table = RouteTable::new();
        table
            .push(Route::option(option("name:"), recorder("name")))
            .with_short_option("n:")
            .unwrap();

        let (_, calls) = run(&mut table, &["-n", "one", "--name", "two"]);

        assert_eq!(
            calls,
            vec![
                ("name".to_string(), Some("one".to_string())),
                ("name".to_string(), Some("two".to_string()))
            ]
        );
    }

    #[test]
    fn test_missing_value_is_not_a_match() {
        let mut table = RouteTable::new();
        table.push(Route::option(option("name:"), recorder("name")));

        let (result, calls) = run(&mut table, &["--name"]);

        assert!(!result.unwrap());
        assert!(calls.is_empty());
    }

    #[test]
    fn test_stdin_route_reads_lines() {
        let mut table: RouteTable<Calls> = RouteTable::new();
        let lines = StdinLines::open(&MockStdin::piped("one\ntwo\n")).unwrap();
        table.push(Route::stdin(
            lines,
            FnHandler::new(|ctx: &mut RouteContext<'_, Calls>| {
                while let Some(line) = ctx.read_line()? {
                    ctx.app_state_mut().push(("stdin".to_string(), Some(line)));
                }
                Ok(())
            }),
        ));

        let (result, calls) = run(&mut table, &[]);

        assert!(result.unwrap());
        assert_eq!(
            calls,
            vec![
                ("stdin".to_string(), Some("one".to_string())),
                ("stdin".to_string(), Some("two".to_string()))
            ]
        );
    }

    #[test]
    fn test_handler_sees_its_own_route() {
        let mut table = RouteTable::new();
        table.push(Route::option(
            option("who"),
            FnHandler::new(|ctx: &mut RouteContext<'_, Calls>| {
                let label = ctx.route().label();
                ctx.app_state_mut().push((label, None));
                Ok(())
            }),
        ));

        let (_, calls) = run(&mut table, &["--who"]);
        assert_eq!(calls, vec![("--who".to_string(), None)]);
    }

    #[test]
    fn test_handler_error_stops_dispatch() {
        let mut table = RouteTable::new();
        table.push(Route::option(
            option("fail"),
            FnHandler::new(|_ctx: &mut RouteContext<'_, Calls>| Err(anyhow::anyhow!("exploded"))),
        ));
        table.push(Route::always(recorder("after")));

        let mut dispatcher = Dispatcher::new();
        let mut calls = Calls::new();
        let failure = dispatcher
            .dispatch(&mut table, &args(&["--fail"]), "", &mut calls)
            .unwrap_err();

        assert_eq!(failure.route, "--fail");
        assert_eq!(failure.to_string(), "exploded");
        assert!(calls.is_empty());
        assert_eq!(dispatcher.current_route(), None);
    }

    #[test]
    fn test_current_route_cleared_after_dispatch() {
        let mut table = RouteTable::new();
        table.push(Route::always(recorder("a")));

        let mut dispatcher = Dispatcher::new();
        let mut calls = Calls::new();
        dispatcher.dispatch(&mut table, &[], "", &mut calls).unwrap();

        assert_eq!(dispatcher.current_route(), None);
    }

    #[test]
    fn test_usage_is_lent_to_handlers() {
        let mut table = RouteTable::new();
        table.push(Route::always(FnHandler::new(
            |ctx: &mut RouteContext<'_, Calls>| {
                let usage = ctx.usage().to_string();
                ctx.app_state_mut().push(("usage".to_string(), Some(usage)));
                Ok(())
            },
        )));

        let mut calls = Calls::new();
        Dispatcher::new()
            .dispatch(&mut table, &[], "Usage: t [OPTION]...\n", &mut calls)
            .unwrap();

        assert_eq!(calls[0].1.as_deref(), Some("Usage: t [OPTION]...\n"));
    }
}
