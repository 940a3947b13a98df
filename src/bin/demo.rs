use std::fs::File;

use simplelog::{Config, LevelFilter, WriteLogger};
use tuiwidgets::{
    Column, Edges, Element, Event, Field, FieldEvent, FocusState, InputKind, Key, Size, Style,
    Table, TableEvent, TableRow, Terminal, Theme,
};

#[derive(Debug, Clone)]
struct User {
    id: String,
    name: String,
    email: String,
    role: String,
}

impl User {
    fn new(id: &str, name: &str, email: &str, role: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role: role.into(),
        }
    }
}

impl TableRow for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "name" => Some(self.name.clone()),
            "email" => Some(self.email.clone()),
            "role" => Some(self.role.clone()),
            _ => None,
        }
    }
}

fn mock_users() -> Vec<User> {
    vec![
        User::new("1", "John Doe", "john@example.com", "Admin"),
        User::new("2", "Jane Smith", "jane@example.com", "User"),
        User::new("3", "Bob Johnson", "bob@example.com", "User"),
    ]
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

fn main() -> std::io::Result<()> {
    let log_file = File::create("demo.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut term = Terminal::new()?;
    let mut focus = FocusState::new();
    let theme = Theme::dark();

    let users = mock_users();

    let mut username = Field::new("username")
        .label("Username")
        .placeholder("Enter your username")
        .clearable(true);
    let mut password = Field::new("password")
        .label("Password")
        .kind(InputKind::Password)
        .placeholder("Enter your password");
    let mut email = Field::new("email")
        .label("Email")
        .placeholder("Enter your email")
        .invalid(true)
        .error_message("Invalid email address");
    let mut disabled_field = Field::new("disabled")
        .label("Disabled Field")
        .placeholder("This is disabled")
        .disabled(true);

    let mut table = Table::new("users")
        .column(Column::field("Name", "name").sortable(true))
        .column(Column::field("Email", "email").sortable(true))
        .column(Column::field("Role", "role").sortable(true))
        .column(Column::derived("Initials", |user: &User| {
            initials(&user.name)
        }))
        .selectable(true);

    let mut username_value = String::new();
    let mut selected: Vec<User> = Vec::new();
    let mut tick = 0u64;

    loop {
        tick += 1;

        let root = ui(
            &theme,
            &focus,
            &username,
            &password,
            &email,
            &disabled_field,
            &table,
            &users,
            &username_value,
            &selected,
            tick,
        );
        term.render(&root)?;

        let raw = term.poll(None)?;
        let events = focus.process_events(&raw, &root, term.layout());

        for event in &events {
            if let Event::Key {
                key: Key::Escape, ..
            } = event
            {
                return Ok(());
            }

            if let Some(FieldEvent::Changed(value)) = username.handle_event(event) {
                username_value = value;
            }
            password.handle_event(event);
            email.handle_event(event);
            disabled_field.handle_event(event);

            if let Some(TableEvent::SelectionChanged(rows)) = table.handle_event(event, &users) {
                log::debug!("[demo] selection now {} rows", rows.len());
                selected = rows;
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn ui(
    theme: &Theme,
    focus: &FocusState,
    username: &Field,
    password: &Field,
    email: &Field,
    disabled_field: &Field,
    table: &Table<User>,
    users: &[User],
    username_value: &str,
    selected: &[User],
    tick: u64,
) -> Element {
    let field_view = |field: &Field| {
        let focused = focus.focused() == Some(field.input_id().as_str());
        field.view(theme, focused, tick)
    };

    let fields = Element::col()
        .width(Size::Fixed(44))
        .gap(1)
        .child(Element::text("InputField Component").style(Style::new().bold()))
        .child(field_view(username))
        .child(field_view(password))
        .child(field_view(email))
        .child(field_view(disabled_field))
        .child(
            Element::text(format!("You typed: {username_value}"))
                .style(Style::new().foreground(theme.muted)),
        );

    let mut selection_panel = Element::col()
        .gap(0)
        .child(Element::text("Selected Users:").style(Style::new().bold()));
    if selected.is_empty() {
        selection_panel = selection_panel
            .child(Element::text("(none)").style(Style::new().foreground(theme.muted)));
    } else {
        for user in selected {
            selection_panel = selection_panel.child(
                Element::text(format!("{} <{}> - {}", user.name, user.email, user.role))
                    .style(Style::new().foreground(theme.text)),
            );
        }
    }

    let table_section = Element::col()
        .gap(1)
        .child(Element::text("DataTable Component").style(Style::new().bold()))
        .child(table.view(users, theme, tick))
        .child(selection_panel);

    Element::col()
        .width(Size::Fill)
        .height(Size::Fill)
        .style(
            Style::new()
                .background(theme.background)
                .foreground(theme.text),
        )
        .padding(Edges::all(2))
        .gap(1)
        .child(Element::text("UI Components Demo").style(Style::new().bold()))
        .child(fields)
        .child(table_section)
        .child(
            Element::text("Tab moves focus · click headers to sort · Esc quits")
                .style(Style::new().foreground(theme.muted)),
        )
}
