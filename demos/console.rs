use bevy::prelude::*;
use bevy_dialogue_box::prelude::*;
use std::time::Duration;

fn main() {
    App::new()
        .add_plugins((MinimalPlugins, DialoguePlugin))
        .add_systems(Startup, setup)
        .add_systems(Update, print_text.after(DialogueSets::Tick))
        .add_observer(|_: Trigger<DialogueStarted>| println!("-- dialogue started --"))
        .add_observer(
            |_: Trigger<DialogueEnded>, mut exit: EventWriter<AppExit>| {
                println!("-- dialogue ended --");
                exit.write(AppExit::Success);
            },
        )
        .run();
}

fn setup(mut commands: Commands) {
    let config = DialogueConfig::new()
        .with_titles(true)
        .with_typing(TypingEffect::new(3))
        .with_auto_skip(Duration::from_millis(750))
        .singleton(true);

    match DialoguePlayer::new(config) {
        Ok(player) => {
            commands.spawn(player);
        }
        Err(e) => {
            eprintln!("invalid dialogue config: {e}");
            return;
        }
    }

    commands.start_dialogue(
        DialogueTarget::default_player(),
        (
            "Hello, Alice!".titled("Bob"),
            "Hey Bob...".titled("Alice"),
            "Crazy weather we're having, huh?".titled("Bob"),
        ),
    );
}

fn print_text(q: Query<(&DialogueTitle, &DialogueText), Changed<DialogueText>>) {
    for (title, text) in q.iter() {
        if !text.0.is_empty() {
            println!("{}: {}", title.0, text.0);
        }
    }
}
