/// The longest message a condition or sub-condition carries.
///
/// The schema rejects messages over 32768 characters; this keeps a small
/// margin below that so a status update is never refused for its size.
pub const LONG_MESSAGE_LENGTH: usize = 32760;

/// Cuts `message` down to [`LONG_MESSAGE_LENGTH`] characters, returning a
/// prefix of the input.
pub fn truncate_message(message: &str) -> &str {
    truncate_message_to(message, LONG_MESSAGE_LENGTH)
}

/// Cuts `message` down to at most `limit` characters.
///
/// This is a plain prefix cut: it does not look for word boundaries, but it
/// never splits a multi-byte character.
pub fn truncate_message_to(message: &str, limit: usize) -> &str {
    match message.char_indices().nth(limit) {
        Some((end, _)) => {
            tracing::debug!(len = message.len(), limit, "Truncating condition message");
            &message[..end]
        }
        None => message,
    }
}

/// Appends `message` to `current` unless it already appears in it.
///
/// Containment, not equality, decides whether a message is new, so a
/// finding reported again on a later attempt does not repeat its text.
pub(super) fn append(current: &mut String, message: &str) {
    if current.contains(message) {
        return;
    }

    if !current.is_empty() {
        current.push_str(", ");
    }
    current.push_str(message);

    let len = truncate_message(current).len();
    current.truncate(len);
}
