use crate::message::{Message, Sender};

/// Handle to a pending "thinking" placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThinkingId(u64);

/// One line of the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Message(Message),
    Thinking(ThinkingId),
}

/// Ordered log of what has been shown to the user.
///
/// Messages are only ever appended. Thinking placeholders are the one kind of
/// entry that can be removed individually; everything goes at once on
/// [`Transcript::clear`].
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
    next_thinking: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.entries.push(Entry::Message(message));
    }

    pub fn push_thinking(&mut self) -> ThinkingId {
        let id = ThinkingId(self.next_thinking);
        self.next_thinking += 1;
        self.entries.push(Entry::Thinking(id));
        id
    }

    /// Remove a placeholder. Returns false if it was already gone.
    pub fn remove_thinking(&mut self, id: ThinkingId) -> bool {
        match self
            .entries
            .iter()
            .position(|entry| *entry == Entry::Thinking(id))
        {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        // Ids keep counting so a handle from before the clear never aliases a new one
        self.entries.clear();
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Rendered messages, skipping placeholders
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Message(message) => Some(message),
            Entry::Thinking(_) => None,
        })
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages().last()
    }

    pub fn count_from(&self, sender: Sender) -> usize {
        self.messages().filter(|m| m.sender() == sender).count()
    }

    pub fn has_thinking(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| matches!(entry, Entry::Thinking(_)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
