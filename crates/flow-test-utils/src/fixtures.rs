//! Canned workflow documents.

/// Three tasks at different states, one nested, plus a non-task heading.
pub const BOARD: &str = "\
#+TITLE: Team board

* Sprint 12
** TODO Write exporter :backend:
:PROPERTIES:
:ID: exp-1
:OWNER: ada
:END:

*** Agent Context
Start in src/export.rs.
Keep the public API stable.

*** Private Notes
Do not share.

** IN-PROGRESS Fix flaky login test
:PROPERTIES:
:ID: login-2
:END:

*** Log

- [2026-01-05T09:00:00.000Z] Reproduced locally.

* DONE Release 1.4
:PROPERTIES:
:ID: rel-3
:END:
";

/// Single task with CRLF line endings and no trailing newline.
pub const CRLF_SINGLE: &str =
    "* BACKLOG Windows task\r\n:PROPERTIES:\r\n:ID: win-1\r\n:END:\r\n** Agent Context\r\nUse CRLF.";

/// A metadata block that is never closed, so it holds no task.
pub const UNTERMINATED: &str = "* TODO Broken\n:PROPERTIES:\n:ID: broken\n* TODO Fine\n:PROPERTIES:\n:ID: fine\n:END:\n";
