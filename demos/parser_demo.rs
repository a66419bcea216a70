use lwcp::parse;

fn main() {
    println!("=== LWCP Parser Demo ===");

    let test_lines = [
        r#"indi studio id=1, name="Studio name", busy_all=FALSE, mute=FALSE"#,
        r#"indi studio line_list=[[IDLE, IDLE, "Main-Studio", "10", NULL, 0, NULL, "", NONE]]"#,
        "get studio.line#3",
        "indi studio.line#3 state=RINGING, hold",
        r#"indi studio name="unterminated"#,
        "hello",
    ];

    for line in test_lines {
        println!("\nInput: '{}'", line);
        println!("Parsed: {:?}", parse(line, false));
        match parse(line, true) {
            Some(message) => match serde_json::to_string(&message) {
                Ok(json) => println!("Converted: {}", json),
                Err(e) => println!("Converted: <unserializable: {}>", e),
            },
            None => println!("Converted: <not a valid LWCP message>"),
        }
    }
}
