/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes two top-level command modules:

- `token`    — Run the login flow and print the access token
- `schedule` — Fetch the personal schedule and render it

These handlers are intentionally small and use the library components:
the auth flow and the schedule client.
*/

pub mod schedule;
pub mod token;
