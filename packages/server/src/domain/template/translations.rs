//! Localized template texts.
//!
//! English is complete. The other tables are partial; a template missing from
//! them is rendered from the English text.

use super::TemplateId;
use crate::domain::value_object::LanguageCode;

pub(super) fn text(language: LanguageCode, id: TemplateId) -> Option<&'static str> {
    match language {
        LanguageCode::En => Some(english(id)),
        LanguageCode::Fr => french(id),
        LanguageCode::Es => spanish(id),
        LanguageCode::De => german(id),
    }
}

fn english(id: TemplateId) -> &'static str {
    match id {
        TemplateId::AlwaysBeTalking1 => "🎤 **Always Be Talking**: Chat is quiet, but that's okay! Keep talking about what you're doing, your thoughts, or ask questions. Say: \"I know chat is quiet right now, but I'm going to keep talking because you never know who might be lurking!\"",
        TemplateId::AlwaysBeTalking2 => "🗣️ **Keep the Energy Up**: Even with no visible chat, keep the conversation flowing! Say: \"I'm going to keep talking because I love what I do! Feel free to jump in anytime!\"",
        TemplateId::AlwaysBeTalking3 => "💭 **Share Your Thoughts**: Use this quiet time to share your process. Say: \"I'm thinking out loud here - this is actually really helpful for me to process what I'm doing!\"",
        TemplateId::AlwaysBeTalking4 => "❓ **Ask Questions**: Even if no one answers, ask questions! Say: \"I'm curious - what do you think about this? Even if you don't type, I'd love to hear your thoughts!\"",
        TemplateId::AlwaysBeTalking5 => "🎯 **Set Goals**: Share your streaming goals. Say: \"My goal today is to [goal]. Even if it's just me here, I'm going to work towards it!\"",
        TemplateId::FirstViewerWelcome => "🎉 **FIRST VIEWER ALERT!**: Welcome to the stream! Say: \"Hey there! Thanks for being my first viewer today! I really appreciate you stopping by!\"",
        TemplateId::FirstViewerEngagement => "🤝 **First Connection**: Make them feel special! Say: \"You're the first person to join me today - that makes you special! What brought you here?\"",
        TemplateId::FirstViewerCommunity => "🏠 **Build Community**: Start building from the first person! Say: \"Welcome to our little community! Even if it's just us two, let's make it awesome!\"",
        TemplateId::NewsDiscussion => "📰 **News Discussion**: Chat is quiet! Try talking about this news story: \"{newsTitle}\" - What do you think about this?",
        TemplateId::TriviaEngagement => "🧠 **Fun Fact**: Here's something interesting: \"{triviaText}\" - Did you know this? Share your thoughts!",
        TemplateId::TimeBasedGreeting => "⏰ **Time-Based**: Good {timeOfDay}! It's {dayOfWeek} and we're {timeContext}. What are you up to today?",
        TemplateId::WeekendEnergy => "🎉 **Weekend Energy**: It's {dayOfWeek} - the perfect time to relax and chat! What are your weekend plans?",
        TemplateId::PrimeTimeBoost => "🔥 **Prime Time**: It's prime time for streaming! With {viewerCount} viewers, let's make this session amazing!",
        TemplateId::RaidCelebration => "⚔️ **RAID INCOMING!**: Welcome raiders! Say: \"Welcome everyone! Thanks for the raid! Let's show them what we're all about!\"",
        TemplateId::SubBombCelebration => "💥 **SUB BOMB!**: Multiple subs! Say: \"Wow! Multiple subs at once! You all are amazing! Thank you so much!\"",
        TemplateId::BitsStorm => "💰 **BITS STORM**: Bits are flying! Say: \"The bits are raining! Thank you all for the amazing support!\"",
        TemplateId::FollowerSurge => "👥 **FOLLOWER SURGE**: New followers coming in! Say: \"Welcome to all the new followers! I'm so excited to have you here!\"",
        TemplateId::PollQuestion => "📊 **Quick Poll**: Let's do a poll! Say: \"Quick question: {pollQuestion}? Type your answer and I'll count the votes!\"",
        TemplateId::ChallengeActivity => "🎯 **Challenge Time**: Let's get interactive! Say: \"Challenge: {challengeDescription}. Who's up for it?\"",
        TemplateId::FallbackEngagementQuestion => "💬 **Direct Question**: Chat needs activation! Say: \"I want to hear from you! What's the most interesting thing that happened to you this week?\" or \"Drop a message and tell me what you think about this topic!\"",
        TemplateId::FallbackEngagementPoll => "📊 **Quick Poll**: Perfect for engagement! Say: \"Let's do a quick poll! Type your favorite [topic] and I'll count the votes!\" or \"I'm curious - what's your opinion on this? Share your thoughts!\"",
        TemplateId::FallbackEngagementChallenge => "🎯 **Interactive Challenge**: Let's get creative! Say: \"Challenge time! Type the most creative [topic] and I'll pick the best ones!\" or \"Who can come up with the funniest [topic]? Let's see what you've got!\"",
        TemplateId::FallbackGrowthWelcome => "👋 **Welcome New Viewers**: Great to see new faces! Say: \"Welcome to all the new faces! Drop a message and tell me where you're from!\" or \"I love seeing new people join! What brought you here today?\"",
        TemplateId::FallbackGrowthCommunity => "🤝 **Build Community**: Perfect time to connect! Say: \"I love this community we're building! Share something about yourself in the chat!\" or \"Let's get to know each other better - what's your favorite thing about this stream?\"",
        TemplateId::FallbackGrowthShare => "📢 **Encourage Sharing**: Great momentum! Say: \"If you're enjoying this, share it with your friends! Tag someone who would love this!\" or \"Help me grow this community - share this stream with someone who needs to see it!\"",
        TemplateId::FallbackBitsAppreciation => "💰 **Bits Boost**: Great bits activity! Say: \"Thanks for the bits! You all are amazing supporters!\" or \"I love seeing the support! Keep those bits coming if you're enjoying this!\"",
        TemplateId::FallbackSubsWelcome => "🎉 **Sub Boost**: New subscriber! Say: \"Welcome to the family! Thanks for subscribing!\" or \"Another amazing person joined the community! Welcome!\"",
        TemplateId::FallbackRaidsWelcome => "⚔️ **Raid Boost**: Incoming raid! Say: \"Welcome raiders! Thanks for bringing the energy!\" or \"Let's show our raiders some love! Welcome everyone!\"",
        TemplateId::FallbackInteractionGame => "🎮 **Interactive Game**: Let's play! Say: \"Game time! Type your favorite [topic] and I'll pick the most creative ones!\" or \"Let's do something fun! Who can guess what I'm thinking about?\"",
        TemplateId::FallbackInteractionStory => "📖 **Share a Story**: Perfect for connection! Say: \"I want to hear your stories! What's the most interesting thing that happened to you recently?\" or \"Let's share some stories! What's something that made you laugh today?\"",
        TemplateId::FallbackInteractionReact => "🎭 **React to Content**: Great energy! Say: \"I love your reactions! What do you think about this? Share your thoughts!\" or \"The chat is buzzing! Let's keep this energy going - what's your take on this?\"",
        TemplateId::FallbackRetentionConnection => "💝 **Build Connection**: Let's connect deeper! Say: \"I want to know you better! What's something that always makes you smile?\" or \"Let's build a real connection - what's your biggest dream right now?\"",
        TemplateId::FallbackRetentionValue => "💎 **Provide Value**: Adding value to your stream! Say: \"I want to make sure you're getting value from this! What would you like to learn more about?\" or \"Let me know what you'd like to see more of in future streams!\"",
        TemplateId::FallbackRetentionEnergy => "⚡ **Boost Energy**: Let's energize the chat! Say: \"I need your energy! What's something that always gets you hyped up?\" or \"Let's turn up the energy! What's your go-to pump-up song?\"",
        TemplateId::FallbackMomentumMaintain => "🔥 **Maintain Momentum**: Keep the energy flowing! Say: \"I love this energy! Let's keep it going - what should we do next?\" or \"The vibe is perfect right now! How can we make it even better?\"",
        TemplateId::FallbackMomentumCelebrate => "🎉 **Celebrate Achievements**: Time to celebrate! Say: \"You all are amazing! What's something you're proud of accomplishing recently?\" or \"Let's celebrate together! What's your biggest win this week?\"",
        TemplateId::FallbackMomentumNext => "🔮 **Tease Next Content**: Building anticipation! Say: \"I'm already excited for next time! What would you like to see in the next stream?\" or \"This is just the beginning! What should we explore together next?\"",
    }
}

fn french(id: TemplateId) -> Option<&'static str> {
    let text = match id {
        TemplateId::AlwaysBeTalking1 => "🎤 **Toujours Parler**: Le chat est calme, mais c'est ok! Continuez à parler de ce que vous faites, vos pensées, ou posez des questions. Dites: \"Je sais que le chat est calme maintenant, mais je vais continuer à parler car on ne sait jamais qui pourrait être là!\"",
        TemplateId::AlwaysBeTalking2 => "🗣️ **Garder l'Énergie**: Même sans chat visible, gardez la conversation fluide! Dites: \"Je vais continuer à parler car j'adore ce que je fais! N'hésitez pas à intervenir à tout moment!\"",
        TemplateId::AlwaysBeTalking3 => "💭 **Partager Vos Pensées**: Utilisez ce temps calme pour partager votre processus. Dites: \"Je réfléchis à voix haute ici - c'est vraiment utile pour moi de traiter ce que je fais!\"",
        TemplateId::AlwaysBeTalking4 => "❓ **Poser des Questions**: Même si personne ne répond, posez des questions! Dites: \"Je suis curieux - qu'en pensez-vous? Même si vous ne tapez pas, j'aimerais entendre vos pensées!\"",
        TemplateId::AlwaysBeTalking5 => "🎯 **Définir des Objectifs**: Partagez vos objectifs de stream. Dites: \"Mon objectif aujourd'hui est de [objectif]. Même si je suis seul ici, je vais travailler pour l'atteindre!\"",
        TemplateId::FirstViewerWelcome => "🎉 **ALERTE PREMIER SPECTATEUR!**: Bienvenue sur le stream ! Dites: \"Salut ! Merci d'être mon premier spectateur aujourd'hui ! J'apprécie vraiment que vous soyez là !\"",
        TemplateId::FirstViewerEngagement => "🤝 **Première Connexion**: Rendez-les spéciaux ! Dites: \"Vous êtes la première personne à me rejoindre aujourd'hui - ça vous rend spécial ! Qu'est-ce qui vous a amené ici ?\"",
        TemplateId::FirstViewerCommunity => "🏠 **Construire Communauté**: Commencez à construire avec la première personne ! Dites: \"Bienvenue dans notre petite communauté ! Même si c'est juste nous deux, rendons-la géniale !\"",
        TemplateId::NewsDiscussion => "📰 **Discussion Actualités**: Le chat est calme! Parlez de cette actualité: \"{newsTitle}\" - Qu'en pensez-vous?",
        TemplateId::TriviaEngagement => "🧠 **Fun Fact**: Voici quelque chose d'intéressant: \"{triviaText}\" - Le saviez-vous? Partagez vos pensées!",
        TemplateId::TimeBasedGreeting => "⏰ **Basé sur l'Heure**: Bon {timeOfDay}! C'est {dayOfWeek} et nous sommes {timeContext}. Que faites-vous aujourd'hui?",
        TemplateId::WeekendEnergy => "🎉 **Énergie Weekend**: C'est {dayOfWeek} - le moment parfait pour se détendre et discuter! Quels sont vos plans de weekend?",
        TemplateId::PrimeTimeBoost => "🔥 **Prime Time**: C'est l'heure de pointe pour le streaming! Avec {viewerCount} spectateurs, rendons cette session incroyable!",
        TemplateId::FallbackEngagementQuestion => "💬 **Question Directe**: Le chat a besoin d'activation! Dites: \"Je veux vous entendre! Quelle est la chose la plus intéressante qui vous est arrivée cette semaine?\" ou \"Laissez un message et dites-moi ce que vous pensez de ce sujet!\"",
        TemplateId::FallbackEngagementPoll => "📊 **Sondage Rapide**: Parfait pour l'engagement! Dites: \"Faisons un sondage rapide! Tapez votre [sujet] préféré et je compterai les votes!\" ou \"Je suis curieux - quel est votre avis là-dessus? Partagez vos pensées!\"",
        TemplateId::FallbackEngagementChallenge => "🎯 **Défi Interactif**: Soyons créatifs! Dites: \"C'est l'heure du défi! Tapez le [sujet] le plus créatif et je choisirai les meilleurs!\" ou \"Qui peut trouver le [sujet] le plus drôle? Montrez-moi ce que vous avez!\"",
        TemplateId::FallbackGrowthWelcome => "👋 **Accueillir Nouveaux Spectateurs**: Super de voir de nouveaux visages! Dites: \"Bienvenue à tous les nouveaux visages! Laissez un message et dites-moi d'où vous venez!\" ou \"J'adore voir de nouvelles personnes rejoindre! Qu'est-ce qui vous a amené ici aujourd'hui?\"",
        TemplateId::FallbackGrowthCommunity => "🤝 **Construire Communauté**: Moment parfait pour se connecter! Dites: \"J'adore cette communauté que nous construisons! Partagez quelque chose sur vous dans le chat!\" ou \"Apprenons à nous connaître mieux - quelle est votre chose préférée dans ce stream?\"",
        TemplateId::FallbackGrowthShare => "📢 **Encourager Partage**: Excellent momentum! Dites: \"Si vous aimez ça, partagez-le avec vos amis! Taggez quelqu'un qui adorerait ça!\" ou \"Aidez-moi à faire grandir cette communauté - partagez ce stream avec quelqu'un qui doit le voir!\"",
        TemplateId::FallbackBitsAppreciation => "💰 **Boost Bits**: Excellente activité bits ! Dites: \"Merci pour les bits ! Vous êtes tous des supporters incroyables !\" ou \"J'adore voir le support ! Continuez les bits si vous aimez ça !\"",
        TemplateId::FallbackSubsWelcome => "🎉 **Boost Sub**: Nouvel abonné ! Dites: \"Bienvenue dans la famille ! Merci de vous être abonné !\" ou \"Une autre personne incroyable a rejoint la communauté ! Bienvenue !\"",
        TemplateId::FallbackRaidsWelcome => "⚔️ **Boost Raid**: Raid entrant ! Dites: \"Bienvenue les raiders ! Merci d'apporter l'énergie !\" ou \"Montrons notre amour aux raiders ! Bienvenue à tous !\"",
        TemplateId::FallbackInteractionGame => "🎮 **Jeu Interactif**: Jouons! Dites: \"C'est l'heure du jeu! Tapez votre [sujet] préféré et je choisirai les plus créatifs!\" ou \"Faisons quelque chose d'amusant! Qui peut deviner à quoi je pense?\"",
        TemplateId::FallbackInteractionStory => "📖 **Partager Histoire**: Parfait pour la connexion! Dites: \"Je veux entendre vos histoires! Quelle est la chose la plus intéressante qui vous est arrivée récemment?\" ou \"Partageons des histoires! Qu'est-ce qui vous a fait rire aujourd'hui?\"",
        TemplateId::FallbackInteractionReact => "🎭 **Réagir au Contenu**: Excellente énergie! Dites: \"J'adore vos réactions! Qu'est-ce que vous pensez de ça? Partagez vos pensées!\" ou \"Le chat bourdonne! Continuons cette énergie - quel est votre avis là-dessus?\"",
        TemplateId::FallbackRetentionConnection => "💝 **Construire Connexion**: Connectons-nous plus profondément! Dites: \"Je veux mieux vous connaître! Qu'est-ce qui vous fait toujours sourire?\" ou \"Construisons une vraie connexion - quel est votre plus grand rêve en ce moment?\"",
        TemplateId::FallbackRetentionValue => "💎 **Fournir Valeur**: Ajoutant de la valeur à votre stream! Dites: \"Je veux m'assurer que vous tirez de la valeur de ça! Sur quoi aimeriez-vous en apprendre plus?\" ou \"Dites-moi ce que vous aimeriez voir plus dans les futurs streams!\"",
        TemplateId::FallbackRetentionEnergy => "⚡ **Booster Énergie**: Énergisons le chat! Dites: \"J'ai besoin de votre énergie! Qu'est-ce qui vous met toujours en forme?\" ou \"Montons l'énergie! Quelle est votre chanson de motivation préférée?\"",
        TemplateId::FallbackMomentumMaintain => "🔥 **Maintenir Momentum**: Gardons l'énergie qui coule! Dites: \"J'adore cette énergie! Continuons - que devrions-nous faire ensuite?\" ou \"L'ambiance est parfaite maintenant! Comment pouvons-nous l'améliorer encore?\"",
        TemplateId::FallbackMomentumCelebrate => "🎉 **Célébrer Réussites**: C'est l'heure de célébrer! Dites: \"Vous êtes tous incroyables! Qu'est-ce dont vous êtes fier d'avoir accompli récemment?\" ou \"Célébrons ensemble! Quelle est votre plus grande victoire cette semaine?\"",
        TemplateId::FallbackMomentumNext => "🔮 **Teaser Prochain Contenu**: Construire l'anticipation! Dites: \"Je suis déjà excité pour la prochaine fois! Qu'aimeriez-vous voir dans le prochain stream?\" ou \"Ce n'est que le début! Qu'explorerons-nous ensemble ensuite?\"",
        _ => return None,
    };
    Some(text)
}

fn spanish(id: TemplateId) -> Option<&'static str> {
    let text = match id {
        TemplateId::AlwaysBeTalking1 => "🎤 **Siempre Hablar**: El chat está tranquilo, ¡pero está bien! Sigue hablando sobre lo que haces, tus pensamientos, o haz preguntas. Di: \"Sé que el chat está tranquilo ahora, pero voy a seguir hablando porque nunca sabes quién podría estar ahí!\"",
        TemplateId::AlwaysBeTalking2 => "🗣️ **Mantener la Energía**: Incluso sin chat visible, mantén la conversación fluida! Di: \"Voy a seguir hablando porque amo lo que hago! Siéntete libre de intervenir en cualquier momento!\"",
        TemplateId::AlwaysBeTalking3 => "💭 **Compartir Tus Pensamientos**: Usa este tiempo tranquilo para compartir tu proceso. Di: \"Estoy pensando en voz alta aquí - esto es realmente útil para procesar lo que estoy haciendo!\"",
        TemplateId::AlwaysBeTalking4 => "❓ **Hacer Preguntas**: Incluso si nadie responde, ¡haz preguntas! Di: \"Tengo curiosidad - ¿qué opinas de esto? Incluso si no escribes, me encantaría escuchar tus pensamientos!\"",
        TemplateId::AlwaysBeTalking5 => "🎯 **Establecer Metas**: Comparte tus objetivos de streaming. Di: \"Mi objetivo hoy es [objetivo]. Incluso si estoy solo aquí, voy a trabajar para lograrlo!\"",
        TemplateId::FirstViewerWelcome => "🎉 **¡ALERTA PRIMER ESPECTADOR!**: ¡Bienvenido al stream! Di: \"¡Hola! ¡Gracias por ser mi primer espectador hoy! ¡Realmente aprecio que estés aquí!\"",
        TemplateId::FirstViewerEngagement => "🤝 **Primera Conexión**: ¡Hazlos sentir especiales! Di: \"Eres la primera persona en unirse a mí hoy - ¡eso te hace especial! ¿Qué te trajo aquí?\"",
        TemplateId::FirstViewerCommunity => "🏠 **Construir Comunidad**: ¡Comienza a construir con la primera persona! Di: \"¡Bienvenido a nuestra pequeña comunidad! ¡Incluso si solo somos nosotros dos, hagámosla increíble!\"",
        TemplateId::NewsDiscussion => "📰 **Discusión de Noticias**: ¡El chat está tranquilo! Habla sobre esta noticia: \"{newsTitle}\" - ¿Qué opinas?",
        TemplateId::TriviaEngagement => "🧠 **Dato Curioso**: Aquí hay algo interesante: \"{triviaText}\" - ¿Lo sabías? ¡Comparte tus pensamientos!",
        TemplateId::TimeBasedGreeting => "⏰ **Basado en la Hora**: ¡Buen {timeOfDay}! Es {dayOfWeek} y estamos {timeContext}. ¿Qué haces hoy?",
        TemplateId::WeekendEnergy => "🎉 **Energía de Fin de Semana**: Es {dayOfWeek} - ¡el momento perfecto para relajarse y charlar! ¿Cuáles son tus planes de fin de semana?",
        TemplateId::PrimeTimeBoost => "🔥 **Hora Pico**: ¡Es hora pico para streaming! Con {viewerCount} espectadores, ¡hagamos esta sesión increíble!",
        _ => return None,
    };
    Some(text)
}

fn german(id: TemplateId) -> Option<&'static str> {
    let text = match id {
        TemplateId::AlwaysBeTalking1 => "🎤 **Immer Sprechen**: Der Chat ist ruhig, aber das ist ok! Sprich weiter über das, was du tust, deine Gedanken, oder stelle Fragen. Sage: \"Ich weiß, der Chat ist gerade ruhig, aber ich werde weiter sprechen, weil man nie weiß, wer zuschauen könnte!\"",
        TemplateId::AlwaysBeTalking2 => "🗣️ **Energie Behalten**: Auch ohne sichtbaren Chat, halte das Gespräch am Laufen! Sage: \"Ich werde weiter sprechen, weil ich liebe, was ich tue! Fühl dich frei, jederzeit einzuspringen!\"",
        TemplateId::AlwaysBeTalking3 => "💭 **Gedanken Teilen**: Nutze diese ruhige Zeit, um deinen Prozess zu teilen. Sage: \"Ich denke hier laut nach - das ist wirklich hilfreich für mich, um zu verarbeiten, was ich tue!\"",
        TemplateId::AlwaysBeTalking4 => "❓ **Fragen Stellen**: Auch wenn niemand antwortet, stelle Fragen! Sage: \"Ich bin neugierig - was denkst du darüber? Auch wenn du nicht tippst, würde ich gerne deine Gedanken hören!\"",
        TemplateId::AlwaysBeTalking5 => "🎯 **Ziele Setzen**: Teile deine Streaming-Ziele. Sage: \"Mein Ziel heute ist [Ziel]. Auch wenn ich hier allein bin, werde ich daran arbeiten, es zu erreichen!\"",
        TemplateId::FirstViewerWelcome => "🎉 **ERSTER ZUSCHAUER ALARM!**: Willkommen beim Stream! Sage: \"Hey! Danke, dass du heute mein erster Zuschauer bist! Ich schätze es wirklich, dass du hier bist!\"",
        TemplateId::FirstViewerEngagement => "🤝 **Erste Verbindung**: Lass sie sich besonders fühlen! Sage: \"Du bist die erste Person, die heute zu mir gestoßen ist - das macht dich besonders! Was hat dich hierher gebracht?\"",
        TemplateId::FirstViewerCommunity => "🏠 **Gemeinschaft Aufbauen**: Fang mit der ersten Person an zu bauen! Sage: \"Willkommen in unserer kleinen Gemeinschaft! Auch wenn es nur wir zwei sind, lass uns sie großartig machen!\"",
        TemplateId::NewsDiscussion => "📰 **Nachrichtendiskussion**: Der Chat ist ruhig! Sprich über diese Nachricht: \"{newsTitle}\" - Was denkst du?",
        TemplateId::TriviaEngagement => "🧠 **Fun Fact**: Hier ist etwas Interessantes: \"{triviaText}\" - Wusstest du das? Teile deine Gedanken!",
        TemplateId::TimeBasedGreeting => "⏰ **Zeitbasiert**: Guten {timeOfDay}! Es ist {dayOfWeek} und wir sind {timeContext}. Was machst du heute?",
        TemplateId::WeekendEnergy => "🎉 **Wochenend Energie**: Es ist {dayOfWeek} - die perfekte Zeit zum Entspannen und Plaudern! Was sind deine Wochenendpläne?",
        TemplateId::PrimeTimeBoost => "🔥 **Prime Time**: Es ist Hauptsendezeit für Streaming! Mit {viewerCount} Zuschauern, lass uns diese Session großartig machen!",
        _ => return None,
    };
    Some(text)
}
