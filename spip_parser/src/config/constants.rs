pub mod compile_time {
    pub mod scanner {
        /// Maximum characters examined when probing for a construct opener
        /// The longest opener prefix is five characters (`</BO` plus the
        /// name character behind it)
        pub const MAX_OPENER_LOOKAHEAD: usize = 5;

        /// Maximum template size accepted by the parser entry points (10MB)
        /// SECURITY: Prevents DoS via enormous template uploads
        pub const MAX_TEMPLATE_SIZE: usize = 10 * 1024 * 1024;

        /// Whitespace run length above which the scanner logs a warning
        /// The run itself stays maximal; only the diagnostic fires
        pub const MAX_WHITESPACE_RUN: usize = 10_000;
    }

    pub mod grammar {
        /// Maximum nesting of brace pairs recognized inside parameter bodies
        /// A fourth-level brace is treated as plain body text
        pub const MAX_BODY_NESTING: usize = 3;

        /// Maximum length of a tag or loop identifier
        /// SECURITY: Prevents parser complexity attacks via huge names
        pub const MAX_IDENTIFIER_LENGTH: usize = 255;

        /// Maximum filters chained after a single tag
        /// SECURITY: Prevents DoS via filter chain explosion
        pub const MAX_FILTER_CHAIN: usize = 100;
    }

    pub mod syntax {
        /// Maximum parser recursion depth to prevent stack overflow
        /// SECURITY: Prevents DoS attacks via deeply nested structures
        pub const MAX_PARSE_DEPTH: usize = 100;

        /// Maximum error history buffer size
        /// RESOURCE: Controls memory usage for error tracking
        pub const MAX_ERROR_HISTORY: usize = 50;

        /// Maximum context stack depth for error reporting
        /// RESOURCE: Prevents unbounded memory growth
        pub const MAX_CONTEXT_STACK_DEPTH: usize = 20;

        /// Maximum nodes produced for a single template
        /// SECURITY: Prevents DoS via node explosion attacks
        pub const MAX_NODE_COUNT: usize = 1_000_000;
    }

    pub mod logging {
        /// Maximum log message length
        /// RESOURCE: Prevents memory attacks via huge messages
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 10_000;

        /// Log buffer size for the in-memory collector
        /// RESOURCE: Controls memory usage for logging
        pub const LOG_BUFFER_SIZE: usize = 10_000;

        /// Maximum log events retained per parse before truncation
        /// RESOURCE: Prevents log event explosion on hostile input
        pub const MAX_LOG_EVENTS_PER_PARSE: usize = 1_000;
    }
}
